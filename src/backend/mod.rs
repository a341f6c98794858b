// Keyslot: Backend Module
//
// The external secure record store. Production code talks to the platform
// keyring (Keychain / Credential Manager / kernel keyutils); tests and
// embedders can use the in-process memory store instead.

mod error;
mod keyring_store;
mod memory;

pub use error::BackendError;
pub use keyring_store::KeyringRecordStore;
pub use memory::MemoryRecordStore;

use std::fmt;

use zeroize::Zeroizing;

/// Identifies a single record in the secure store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    pub service: String,
    pub account: String,
}

impl RecordId {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.account)
    }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the platform secure store, enabling the keyring backend
/// and in-memory implementations for testing.
///
/// Records are opaque blobs addressed by [`RecordId`]. Blobs returned by
/// `query` are wrapped in `Zeroizing` so the plaintext is wiped on drop.
pub trait RecordStore: Send + Sync {
    /// Fetch the blob for `id`, or `None` if no record exists.
    fn query(&self, id: &RecordId) -> Result<Option<Zeroizing<Vec<u8>>>, BackendError>;

    /// Create a new record. Fails with `AlreadyExists` if one is present.
    fn insert(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError>;

    /// Replace an existing record. Fails with `NotFound` if none is present.
    fn update(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError>;

    /// Remove the record. Returns true if it existed.
    fn delete(&self, id: &RecordId) -> Result<bool, BackendError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn query(&self, id: &RecordId) -> Result<Option<Zeroizing<Vec<u8>>>, BackendError> {
        (**self).query(id)
    }

    fn insert(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError> {
        (**self).insert(id, blob)
    }

    fn update(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError> {
        (**self).update(id, blob)
    }

    fn delete(&self, id: &RecordId) -> Result<bool, BackendError> {
        (**self).delete(id)
    }
}
