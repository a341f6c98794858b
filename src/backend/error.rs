// Keyslot: Backend error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Access to the credential store was denied: {0}")]
    AccessDenied(String),

    #[error("Keyring error: {0}")]
    Keyring(String),
}

impl BackendError {
    /// Whether an upsert should retry with the opposite operation.
    pub fn is_existence_conflict(&self) -> bool {
        matches!(self, Self::NotFound | Self::AlreadyExists)
    }
}
