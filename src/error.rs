//! Log store error types
//!
//! Defines all errors that can occur in the log store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the log store
#[derive(Error, Debug)]
pub enum LogError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Query issued against a live log file that was never written
    #[error("log file not found at '{0}'")]
    LogFileNotFound(PathBuf),

    /// Slice or line index outside the available entries
    #[error("range out of bounds: start {start}, count {count}, available {len}")]
    RangeOutOfBounds { start: i64, count: i64, len: usize },

    /// Timestamp string does not match the expected pattern
    #[error("malformed timestamp: '{0}'")]
    MalformedTimestamp(String),

    /// Line does not match the `"[<timestamp>] <text>"` shape
    #[error("malformed log line: '{0}'")]
    MalformedLine(String),

    /// Archive filename is not a `<YYYY-MM-DD>.log` name
    #[error("malformed archive name: '{0}'")]
    MalformedArchiveName(String),

    /// Entry text contains a raw line break (one entry per physical line)
    #[error("log text contains an embedded line break")]
    EmbeddedNewline,

    /// Payload serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Serialization(err.to_string())
    }
}

/// Result type alias for log store operations
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LogError::RangeOutOfBounds {
            start: 10,
            count: 5,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "range out of bounds: start 10, count 5, available 5"
        );

        let err = LogError::MalformedTimestamp("yesterday-ish".to_string());
        assert_eq!(err.to_string(), "malformed timestamp: 'yesterday-ish'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let log_err: LogError = io_err.into();
        assert!(matches!(log_err, LogError::Io(_)));
    }
}
