//! Persistence error types.

use thiserror::Error;

/// Errors raised while writing or reading change-log records.
#[derive(Error, Debug)]
pub enum PersistError {
    /// The underlying sink or source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes were read but do not form a valid record
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl PersistError {
    /// Returns true for log corruption as opposed to an I/O fault.
    pub fn is_malformed(&self) -> bool {
        matches!(self, PersistError::MalformedRecord(_))
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::MalformedRecord(e.to_string())
    }
}

/// Result alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;
