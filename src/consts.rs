//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Question shown before anything has been submitted.
pub const PLACEHOLDER_QUESTION: &str = "Жду данных...";

/// Answer shown before anything has been submitted.
pub const INITIAL_ANSWER: &str = "";

/// Answer visible to readers while the backend call is in flight.
pub const PROCESSING_ANSWER: &str = "processing...";

/// Prefix of every answer that carries a recovered failure instead of a reply.
pub const ERROR_PREFIX: &str = "Ошибка: ";

/// Line written after every audit record.
pub const RECORD_SEPARATOR: &str = "----------------------------------------";

/// Environment variable holding the Anthropic API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Default Anthropic model when none is specified.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default audit log path, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Upper bound on a single backend call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Longest accepted question, in characters.
pub const MAX_QUESTION_CHARS: usize = 4000;
