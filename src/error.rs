// Keyslot: Top-level error types
//
// Aggregates record, IO and JSON errors into a single
// error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all Keyslot operations.
#[derive(Debug, Error)]
pub enum KeyslotError {
    #[error("Record error: {0}")]
    Record(#[from] crate::record::RecordError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KeyslotError>;
