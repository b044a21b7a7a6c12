//! Common error types for FilterFlix

use thiserror::Error;

/// Common result type for FilterFlix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across FilterFlix crates
#[derive(Error, Debug)]
pub enum Error {
    /// Time string is not `HH:MM:SS`
    #[error("Invalid time '{input}': {reason}")]
    TimeFormat { input: String, reason: String },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or document shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn time_format(input: &str, reason: impl Into<String>) -> Self {
        Error::TimeFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
