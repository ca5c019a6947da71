use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Responder, ResponderError};

/// A scripted responder for tests. Returns pre-defined replies in order,
/// or derives the reply from the question when built with [`MockResponder::deriving`].
pub struct MockResponder {
    replies: Vec<Result<String, ResponderError>>,
    derive: bool,
    delay: Duration,
    index: AtomicUsize,
}

impl MockResponder {
    pub fn new(replies: Vec<Result<String, ResponderError>>) -> Self {
        Self {
            replies,
            derive: false,
            delay: Duration::ZERO,
            index: AtomicUsize::new(0),
        }
    }

    /// Answers every question with `answer to <question>`.
    pub fn deriving() -> Self {
        Self {
            derive: true,
            ..Self::new(Vec::new())
        }
    }

    /// Sleep before replying, to hold a call in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// How many times `respond` has been called.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, question: &str) -> Result<String, ResponderError> {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.derive {
            return Ok(format!("answer to {question}"));
        }
        self.replies.get(i).cloned().unwrap_or_else(|| {
            Err(ResponderError::Malformed(format!(
                "MockResponder: no more replies (called {} times)",
                i + 1
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_runs_out() {
        let mock = MockResponder::new(vec![
            Ok("one".to_string()),
            Err(ResponderError::Network("down".to_string())),
        ]);
        assert_eq!(mock.respond("a").await.unwrap(), "one");
        assert!(matches!(
            mock.respond("b").await,
            Err(ResponderError::Network(_))
        ));
        assert!(mock.respond("c").await.is_err());
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn deriving_uses_question() {
        let mock = MockResponder::deriving();
        assert_eq!(mock.respond("x").await.unwrap(), "answer to x");
    }
}
