//! The latest-message store.
//!
//! Holds the single current question/answer pair. Readers always get a whole
//! [`Snapshot`]; submissions are serialized so each one's
//! question → pending → answer sequence is never interleaved with another's.

use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::consts::{
    DEFAULT_TIMEOUT_SECS, ERROR_PREFIX, INITIAL_ANSWER, MAX_QUESTION_CHARS, PLACEHOLDER_QUESTION,
    PROCESSING_ANSWER,
};
use crate::journal::{Journal, Record};
use crate::responder::{Responder, ResponderError};

/// The current question and its answer, always read and written as a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub question: String,
    pub answer: String,
}

impl Snapshot {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(PLACEHOLDER_QUESTION, INITIAL_ANSWER)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("question is {len} characters long, the limit is {max}")]
    TooLong { len: usize, max: usize },

    /// The submission task panicked or the runtime is shutting down.
    #[error("submission interrupted: {0}")]
    Interrupted(String),
}

pub struct StoreConfig {
    /// Upper bound on one responder call. Expiry is recovered like any other failure.
    pub timeout: Duration,
    pub max_question_chars: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_question_chars: MAX_QUESTION_CHARS,
        }
    }
}

/// Single-slot holder of the latest question/answer pair.
pub struct LatestMessageStore {
    inner: Arc<Inner>,
}

struct Inner {
    current: RwLock<Snapshot>,
    submit_lock: Mutex<()>,
    responder: Arc<dyn Responder>,
    journal: Arc<dyn Journal>,
    config: StoreConfig,
}

impl LatestMessageStore {
    pub fn new(
        responder: Arc<dyn Responder>,
        journal: Arc<dyn Journal>,
        config: StoreConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(Snapshot::default()),
                submit_lock: Mutex::new(()),
                responder,
                journal,
                config,
            }),
        }
    }

    /// The current pair. Never blocks on an in-flight submission.
    pub fn get_current(&self) -> Snapshot {
        self.inner
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Store `question`, ask the responder, store its answer (or the failure
    /// as text), append one audit record, and return the final pair.
    ///
    /// Responder and journal failures never surface here. Validation
    /// rejections leave the store and the log untouched.
    ///
    /// The work runs on its own task: dropping the returned future (client
    /// disconnect, shutdown) does not leave the pending answer behind.
    pub async fn submit(&self, question: &str) -> Result<Snapshot, StoreError> {
        self.inner.validate(question)?;

        let inner = Arc::clone(&self.inner);
        let question = question.to_string();
        tokio::spawn(async move { inner.run(&question).await })
            .await
            .map_err(|e| StoreError::Interrupted(e.to_string()))
    }
}

impl Inner {
    fn validate(&self, question: &str) -> Result<(), StoreError> {
        if question.trim().is_empty() {
            return Err(StoreError::EmptyQuestion);
        }
        let len = question.chars().count();
        if len > self.config.max_question_chars {
            return Err(StoreError::TooLong {
                len,
                max: self.config.max_question_chars,
            });
        }
        Ok(())
    }

    async fn run(&self, question: &str) -> Snapshot {
        // Held across the responder call: submissions run one at a time.
        let _turn = self.submit_lock.lock().await;

        self.publish(Snapshot::new(question, PROCESSING_ANSWER));
        info!(chars = question.chars().count(), "submission accepted");

        let started = Instant::now();
        let answer = match self.ask(question).await {
            Ok(reply) => {
                debug!(elapsed_ms = started.elapsed().as_millis() as u64, "reply received");
                reply
            }
            Err(e) => {
                warn!(error = %e, "answer service failed, storing error text");
                format!("{ERROR_PREFIX}{e}")
            }
        };

        let snapshot = Snapshot::new(question, answer);
        self.publish(snapshot.clone());

        let record = Record::new(&snapshot.question, &snapshot.answer);
        if let Err(e) = self.journal.append(&record).await {
            error!(error = %format!("{e:#}"), "failed to append audit record");
        }

        snapshot
    }

    async fn ask(&self, question: &str) -> Result<String, ResponderError> {
        match tokio::time::timeout(self.config.timeout, self.responder.respond(question)).await {
            Ok(result) => result,
            Err(_) => Err(ResponderError::Timeout(self.config.timeout)),
        }
    }

    fn publish(&self, snapshot: Snapshot) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot;
    }
}
