// Keyslot: Platform Keyring Store
//
// Persists record blobs as the secret bytes of a keyring entry. The keyring
// crate dispatches to:
//   - macOS / iOS: Security.framework Keychain
//   - Windows: Windows Credential Manager
//   - Linux: kernel keyutils
//
// The keyring API only exposes get / set / delete, so insert and update
// check existence first to honour the store contract.
//
// On Linux the `linux-native` backend uses kernel keyutils, whose keys live
// in the session keyring: records do not survive logout or reboot there.
// Hosts that need durable records on Linux must supply their own
// `RecordStore`.

use zeroize::Zeroizing;

use super::{BackendError, RecordId, RecordStore};

/// Production implementation using the `keyring` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringRecordStore;

impl KeyringRecordStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(&self, id: &RecordId) -> Result<keyring::Entry, BackendError> {
        keyring::Entry::new(&id.service, &id.account).map_err(|e| {
            BackendError::Keyring(format!("failed to create keyring entry for {}: {}", id, e))
        })
    }

    fn exists(entry: &keyring::Entry) -> Result<bool, BackendError> {
        match entry.get_secret() {
            Ok(secret) => {
                drop(Zeroizing::new(secret));
                Ok(true)
            }
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(map_keyring_error(e)),
        }
    }
}

impl RecordStore for KeyringRecordStore {
    fn query(&self, id: &RecordId) -> Result<Option<Zeroizing<Vec<u8>>>, BackendError> {
        let entry = self.entry(id)?;
        match entry.get_secret() {
            Ok(secret) => {
                tracing::debug!(record = %id, "Read record from keyring");
                Ok(Some(Zeroizing::new(secret)))
            }
            Err(keyring::Error::NoEntry) => {
                tracing::debug!(record = %id, "No record in keyring");
                Ok(None)
            }
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn insert(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError> {
        let entry = self.entry(id)?;
        if Self::exists(&entry)? {
            return Err(BackendError::AlreadyExists);
        }
        entry.set_secret(blob).map_err(map_keyring_error)?;
        tracing::debug!(record = %id, bytes = blob.len(), "Inserted record into keyring");
        Ok(())
    }

    fn update(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError> {
        let entry = self.entry(id)?;
        if !Self::exists(&entry)? {
            return Err(BackendError::NotFound);
        }
        entry.set_secret(blob).map_err(map_keyring_error)?;
        tracing::debug!(record = %id, bytes = blob.len(), "Updated record in keyring");
        Ok(())
    }

    fn delete(&self, id: &RecordId) -> Result<bool, BackendError> {
        let entry = self.entry(id)?;
        match entry.delete_credential() {
            Ok(()) => {
                tracing::debug!(record = %id, "Deleted record from keyring");
                Ok(true)
            }
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(map_keyring_error(e)),
        }
    }
}

fn map_keyring_error(err: keyring::Error) -> BackendError {
    match err {
        keyring::Error::NoEntry => BackendError::NotFound,
        keyring::Error::NoStorageAccess(inner) => BackendError::AccessDenied(inner.to_string()),
        other => BackendError::Keyring(other.to_string()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
