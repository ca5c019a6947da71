pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::consts::RECORD_SEPARATOR;

/// One submission as written to the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub question: String,
    pub answer: String,
}

impl Record {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// The exact text appended for this record, separator included.
    pub fn render(&self) -> String {
        format!(
            "Вопрос: {}\nОтвет: {}\n{}\n",
            self.question, self.answer, RECORD_SEPARATOR
        )
    }
}

/// Where submissions are recorded. Write-only: nothing reads it back.
#[async_trait]
pub trait Journal: Send + Sync {
    async fn append(&self, record: &Record) -> Result<()>;
}
