use async_trait::async_trait;

use super::{Responder, ResponderError};

/// Offline responder that repeats the question back. Needs no credential.
pub struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn respond(&self, question: &str) -> Result<String, ResponderError> {
        Ok(format!("Вы написали: {question}"))
    }
}
