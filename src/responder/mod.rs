pub mod anthropic;
pub mod echo;
pub mod mock;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Why a responder could not produce a reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResponderError {
    /// The credential is not configured. No request was sent.
    #[error("missing credential: set {var} to use the answer service")]
    MissingCredential { var: String },

    #[error("answer service did not reply within {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("answer service rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ResponderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ResponderError::Malformed(e.to_string())
        } else {
            ResponderError::Network(e.to_string())
        }
    }
}

/// Turns a question into reply text. Could be an LLM, an echo, or a test script.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, question: &str) -> Result<String, ResponderError>;
}
