// Keyslot: Record error types

use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Credential store error: {0}")]
    Backend(#[from] BackendError),

    #[error("Attribute blob codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Value under '{key}' is nested {depth} levels deep (limit {limit})")]
    TooDeep {
        key: String,
        depth: usize,
        limit: usize,
    },
}
