// Keyslot: In-Memory Record Store
//
// Keeps record blobs in a process-local map. Used by the unit tests so they
// never touch the real platform keyring, and usable by embedders that want
// the accessor semantics without persistence.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use zeroize::Zeroizing;

use super::{BackendError, RecordId, RecordStore};

#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<RecordId, Zeroizing<Vec<u8>>>>,
}

/// Lists record ids only. Blobs never appear in Debug output.
impl fmt::Debug for MemoryRecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let records = self.records();
        let mut ids: Vec<String> = records.keys().map(ToString::to_string).collect();
        ids.sort();
        f.debug_struct("MemoryRecordStore")
            .field("records", &ids)
            .finish()
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a raw blob under `id`, bypassing the insert/update checks.
    /// Handy for seeding records that were written by something else.
    pub fn put_raw(&self, id: &RecordId, blob: impl Into<Vec<u8>>) {
        self.records().insert(id.clone(), Zeroizing::new(blob.into()));
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<RecordId, Zeroizing<Vec<u8>>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryRecordStore {
    fn query(&self, id: &RecordId) -> Result<Option<Zeroizing<Vec<u8>>>, BackendError> {
        Ok(self.records().get(id).cloned())
    }

    fn insert(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError> {
        let mut records = self.records();
        if records.contains_key(id) {
            return Err(BackendError::AlreadyExists);
        }
        records.insert(id.clone(), Zeroizing::new(blob.to_vec()));
        Ok(())
    }

    fn update(&self, id: &RecordId, blob: &[u8]) -> Result<(), BackendError> {
        match self.records().get_mut(id) {
            Some(existing) => {
                *existing = Zeroizing::new(blob.to_vec());
                Ok(())
            }
            None => Err(BackendError::NotFound),
        }
    }

    fn delete(&self, id: &RecordId) -> Result<bool, BackendError> {
        Ok(self.records().remove(id).is_some())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record_id() -> RecordId {
        RecordId::new("keyslot-test", "memory")
    }

    #[test]
    fn test_query_missing_returns_none() {
        let store = MemoryRecordStore::new();
        assert!(store.query(&record_id()).unwrap().is_none());
    }

    #[test]
    fn test_insert_then_query() {
        let store = MemoryRecordStore::new();
        store.insert(&record_id(), b"blob").unwrap();

        let blob = store.query(&record_id()).unwrap().unwrap();
        assert_eq!(blob.as_slice(), b"blob");
    }

    #[test]
    fn test_insert_existing_is_rejected() {
        let store = MemoryRecordStore::new();
        store.insert(&record_id(), b"first").unwrap();

        let err = store.insert(&record_id(), b"second").unwrap_err();
        assert!(matches!(err, BackendError::AlreadyExists));
        assert_eq!(store.query(&record_id()).unwrap().unwrap().as_slice(), b"first");
    }

    #[test]
    fn test_update_missing_is_rejected() {
        let store = MemoryRecordStore::new();
        let err = store.update(&record_id(), b"blob").unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_replaces_blob() {
        let store = MemoryRecordStore::new();
        store.insert(&record_id(), b"old").unwrap();
        store.update(&record_id(), b"new").unwrap();
        assert_eq!(store.query(&record_id()).unwrap().unwrap().as_slice(), b"new");
    }

    #[test]
    fn test_delete_reports_existence() {
        let store = MemoryRecordStore::new();
        assert!(!store.delete(&record_id()).unwrap());

        store.put_raw(&record_id(), b"seeded".to_vec());
        assert!(store.contains(&record_id()));
        assert!(store.delete(&record_id()).unwrap());
        assert!(!store.contains(&record_id()));
    }

    #[test]
    fn test_debug_output_omits_blobs() {
        let store = MemoryRecordStore::new();
        store.insert(&record_id(), b"hunter2").unwrap();

        let debug_output = format!("{:?}", store);
        assert!(debug_output.contains("keyslot-test/memory"));
        assert!(!debug_output.contains("hunter2"));
        assert!(!debug_output.contains("104"), "raw bytes must not be printed");
    }

    #[test]
    fn test_records_are_isolated_by_id() {
        let store = MemoryRecordStore::new();
        let other = RecordId::new("keyslot-test", "other");
        store.insert(&record_id(), b"a").unwrap();
        store.insert(&other, b"b").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.query(&other).unwrap().unwrap().as_slice(), b"b");
    }
}
