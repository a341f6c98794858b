// Keyslot: Credential Record Accessor
//
// Typed read/write access to named fields of the single record managed by a
// `RecordStore`. The store is the only source of truth: every call reloads
// the record, and every write is a read-modify-write of the whole blob.
//
// Two layers:
//   - `lookup_*` / `try_*` return explicit results (`Lookup`, `RecordError`)
//   - `get_*` / `set_*` / `reset` never fail; they log and substitute defaults
//
// No locking is done here. Concurrent writers race and the last
// read-modify-write wins.

use chrono::{DateTime, Utc};

use crate::backend::{BackendError, KeyringRecordStore, RecordId, RecordStore};
use crate::config::RecordConfig;
use crate::record::{
    decode_attributes, encode_attributes, AttributeMap, AttributeValue, FromAttribute, Lookup,
    RecordError, RecordState,
};

/// Accessor for one record, identified by service/account, in a secure store.
#[derive(Debug)]
pub struct CredentialRecord<S> {
    store: S,
    id: RecordId,
}

/// The current contents of the record as seen by a writer.
struct Snapshot {
    attributes: AttributeMap,
    exists: bool,
}

impl CredentialRecord<KeyringRecordStore> {
    /// Accessor backed by the platform keyring.
    pub fn keyring(config: &RecordConfig) -> Self {
        Self::from_config(KeyringRecordStore::new(), config)
    }
}

impl<S: RecordStore> CredentialRecord<S> {
    pub fn new(store: S, id: RecordId) -> Self {
        Self { store, id }
    }

    pub fn from_config(store: S, config: &RecordConfig) -> Self {
        Self::new(store, config.record_id())
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ─── Record lifecycle ────────────────────────────────────────────────────

    /// Report whether the record exists, without creating it.
    pub fn state(&self) -> Result<RecordState, RecordError> {
        match self.store.query(&self.id)? {
            Some(_) => Ok(RecordState::Present),
            None => Ok(RecordState::Absent),
        }
    }

    /// Persist an empty record if none exists. Returns true if one was created.
    pub fn try_initialize(&self) -> Result<bool, RecordError> {
        if self.store.query(&self.id)?.is_some() {
            return Ok(false);
        }
        self.persist_empty(false)?;
        tracing::info!(record = %self.id, "Created default record");
        Ok(true)
    }

    /// Discard the record and replace it with an empty mapping.
    pub fn try_reset(&self) -> Result<(), RecordError> {
        let exists = match self.store.delete(&self.id) {
            Ok(deleted) => {
                tracing::debug!(record = %self.id, deleted, "Deleted record for reset");
                false
            }
            Err(BackendError::NotFound) => false,
            Err(e) => {
                // The record may still be there; overwrite it instead.
                tracing::warn!(
                    record = %self.id,
                    error = %e,
                    "Failed to delete record during reset"
                );
                true
            }
        };
        self.persist_empty(exists)?;
        tracing::info!(record = %self.id, "Record reset to empty mapping");
        Ok(())
    }

    /// Fail-silent form of [`try_reset`](Self::try_reset).
    pub fn reset(&self) {
        if let Err(e) = self.try_reset() {
            tracing::warn!(record = %self.id, error = %e, "Record reset failed");
        }
    }

    // ─── Raw access ──────────────────────────────────────────────────────────

    /// Read the whole attribute mapping.
    ///
    /// An absent record is created empty and reported as `Found` with no keys.
    pub fn try_raw_data(&self) -> Result<Lookup<AttributeMap>, RecordError> {
        let blob = match self.store.query(&self.id)? {
            Some(blob) => blob,
            None => {
                self.create_on_read();
                return Ok(Lookup::Found(AttributeMap::new()));
            }
        };
        match decode_attributes(&blob) {
            Ok(attributes) => Ok(Lookup::Found(attributes)),
            Err(e) => Ok(Lookup::DecodeError(e.to_string())),
        }
    }

    /// Read the whole attribute mapping, or an empty one if it cannot be read.
    pub fn raw_data(&self) -> AttributeMap {
        match self.try_raw_data() {
            Ok(Lookup::Found(attributes)) => attributes,
            Ok(Lookup::NotFound) => AttributeMap::new(),
            Ok(Lookup::DecodeError(reason)) => {
                tracing::warn!(
                    record = %self.id,
                    %reason,
                    "Record blob did not decode, using empty mapping"
                );
                AttributeMap::new()
            }
            Err(e) => {
                tracing::warn!(
                    record = %self.id,
                    error = %e,
                    "Record unreadable, using empty mapping"
                );
                AttributeMap::new()
            }
        }
    }

    /// Replace the whole attribute mapping.
    pub fn try_set_raw_data(&self, attributes: &AttributeMap) -> Result<(), RecordError> {
        let exists = self.store.query(&self.id)?.is_some();
        let blob = encode_attributes(attributes)?;
        self.upsert(exists, &blob)?;
        tracing::debug!(record = %self.id, keys = attributes.len(), "Replaced record contents");
        Ok(())
    }

    pub fn set_raw_data(&self, attributes: &AttributeMap) {
        if let Err(e) = self.try_set_raw_data(attributes) {
            tracing::warn!(record = %self.id, error = %e, "Failed to replace record contents");
        }
    }

    /// Keys currently stored in the record.
    pub fn keys(&self) -> Vec<String> {
        self.raw_data().into_keys().collect()
    }

    // ─── Keyed access ────────────────────────────────────────────────────────

    /// Look up `key` without constraining its kind.
    pub fn lookup_value(&self, key: &str) -> Result<Lookup<AttributeValue>, RecordError> {
        Ok(match self.try_raw_data()? {
            Lookup::Found(mut attributes) => match attributes.remove(key) {
                Some(value) => Lookup::Found(value),
                None => Lookup::NotFound,
            },
            Lookup::NotFound => Lookup::NotFound,
            Lookup::DecodeError(reason) => Lookup::DecodeError(reason),
        })
    }

    /// Look up `key` as a `T`. A value of another kind is a decode error.
    pub fn lookup<T: FromAttribute>(&self, key: &str) -> Result<Lookup<T>, RecordError> {
        Ok(match self.lookup_value(key)? {
            Lookup::Found(value) => match T::from_attribute(value) {
                Ok(typed) => Lookup::Found(typed),
                Err(found) => Lookup::DecodeError(format!(
                    "key '{}' holds a {} value, expected {}",
                    key,
                    found,
                    T::KIND
                )),
            },
            Lookup::NotFound => Lookup::NotFound,
            Lookup::DecodeError(reason) => Lookup::DecodeError(reason),
        })
    }

    /// Default-substituting form of [`lookup`](Self::lookup).
    pub fn get_or_default<T: FromAttribute + Default>(&self, key: &str) -> T {
        self.get_or_none(key).unwrap_or_default()
    }

    fn get_or_none<T: FromAttribute>(&self, key: &str) -> Option<T> {
        let kind = T::KIND;
        match self.lookup::<T>(key) {
            Ok(Lookup::Found(value)) => Some(value),
            Ok(Lookup::NotFound) => None,
            Ok(Lookup::DecodeError(reason)) => {
                tracing::warn!(
                    record = %self.id,
                    key,
                    kind = %kind,
                    %reason,
                    "Unreadable value, using default"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    record = %self.id,
                    key,
                    kind = %kind,
                    error = %e,
                    "Record unreadable, using default"
                );
                None
            }
        }
    }

    /// Store `value` under `key`, overwriting any previous value.
    pub fn try_set<V: Into<AttributeValue>>(&self, key: &str, value: V) -> Result<(), RecordError> {
        let value = value.into();
        let kind = value.kind();
        self.modify(|attributes| {
            attributes.insert(key.to_string(), value);
        })?;
        tracing::debug!(record = %self.id, key, %kind, "Stored value");
        Ok(())
    }

    /// Fail-silent form of [`try_set`](Self::try_set).
    pub fn set<V: Into<AttributeValue>>(&self, key: &str, value: V) {
        if let Err(e) = self.try_set(key, value) {
            tracing::warn!(record = %self.id, key, error = %e, "Failed to store value");
        }
    }

    /// Remove `key` from the record. Returns true if it was present.
    pub fn try_remove(&self, key: &str) -> Result<bool, RecordError> {
        let mut removed = false;
        self.modify(|attributes| {
            removed = attributes.remove(key).is_some();
        })?;
        Ok(removed)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.try_remove(key).unwrap_or_else(|e| {
            tracing::warn!(record = %self.id, key, error = %e, "Failed to remove value");
            false
        })
    }

    // ─── Typed accessors ─────────────────────────────────────────────────────

    pub fn lookup_bool(&self, key: &str) -> Result<Lookup<bool>, RecordError> {
        self.lookup(key)
    }

    /// `false` when the key is missing or unreadable.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get_or_default(key)
    }

    pub fn try_set_bool(&self, key: &str, value: bool) -> Result<(), RecordError> {
        self.try_set(key, value)
    }

    pub fn set_bool(&self, key: &str, value: bool) {
        self.set(key, value)
    }

    pub fn lookup_string(&self, key: &str) -> Result<Lookup<String>, RecordError> {
        self.lookup(key)
    }

    /// Empty string when the key is missing or unreadable.
    pub fn get_string(&self, key: &str) -> String {
        self.get_or_default(key)
    }

    pub fn try_set_string(&self, key: &str, value: &str) -> Result<(), RecordError> {
        self.try_set(key, value)
    }

    pub fn set_string(&self, key: &str, value: &str) {
        self.set(key, value)
    }

    pub fn lookup_array(&self, key: &str) -> Result<Lookup<Vec<AttributeValue>>, RecordError> {
        self.lookup(key)
    }

    pub fn get_array(&self, key: &str) -> Vec<AttributeValue> {
        self.get_or_default(key)
    }

    pub fn try_set_array(&self, key: &str, value: Vec<AttributeValue>) -> Result<(), RecordError> {
        self.try_set(key, value)
    }

    pub fn set_array(&self, key: &str, value: Vec<AttributeValue>) {
        self.set(key, value)
    }

    pub fn lookup_dictionary(&self, key: &str) -> Result<Lookup<AttributeMap>, RecordError> {
        self.lookup(key)
    }

    pub fn get_dictionary(&self, key: &str) -> AttributeMap {
        self.get_or_default(key)
    }

    pub fn try_set_dictionary(&self, key: &str, value: AttributeMap) -> Result<(), RecordError> {
        self.try_set(key, value)
    }

    pub fn set_dictionary(&self, key: &str, value: AttributeMap) {
        self.set(key, value)
    }

    pub fn lookup_date(&self, key: &str) -> Result<Lookup<DateTime<Utc>>, RecordError> {
        self.lookup(key)
    }

    /// `None` when the key is missing or unreadable.
    pub fn get_date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get_or_none(key)
    }

    pub fn try_set_date(&self, key: &str, value: DateTime<Utc>) -> Result<(), RecordError> {
        self.try_set(key, value)
    }

    pub fn set_date(&self, key: &str, value: DateTime<Utc>) {
        self.set(key, value)
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    /// Load the record for writing. Absent or undecodable records start empty.
    fn snapshot(&self) -> Result<Snapshot, RecordError> {
        let Some(blob) = self.store.query(&self.id)? else {
            return Ok(Snapshot {
                attributes: AttributeMap::new(),
                exists: false,
            });
        };
        let attributes = decode_attributes(&blob).unwrap_or_else(|e| {
            tracing::warn!(record = %self.id, error = %e, "Discarding undecodable record blob");
            AttributeMap::new()
        });
        Ok(Snapshot {
            attributes,
            exists: true,
        })
    }

    fn modify<F>(&self, edit: F) -> Result<(), RecordError>
    where
        F: FnOnce(&mut AttributeMap),
    {
        let mut snapshot = self.snapshot()?;
        edit(&mut snapshot.attributes);
        let blob = encode_attributes(&snapshot.attributes)?;
        self.upsert(snapshot.exists, &blob)
    }

    fn persist_empty(&self, exists: bool) -> Result<(), RecordError> {
        let blob = encode_attributes(&AttributeMap::new())?;
        self.upsert(exists, &blob)
    }

    /// Lazily create the record on the read path. Failure only costs persistence.
    fn create_on_read(&self) {
        match self.persist_empty(false) {
            Ok(()) => tracing::info!(record = %self.id, "Created default record"),
            Err(e) => {
                tracing::warn!(record = %self.id, error = %e, "Failed to create default record")
            }
        }
    }

    /// Update when the record was seen, insert otherwise. If the store
    /// disagrees about existence, retry once with the other operation.
    fn upsert(&self, exists: bool, blob: &[u8]) -> Result<(), RecordError> {
        let first = if exists {
            self.store.update(&self.id, blob)
        } else {
            self.store.insert(&self.id, blob)
        };
        match first {
            Ok(()) => Ok(()),
            Err(e) if e.is_existence_conflict() => {
                tracing::debug!(
                    record = %self.id,
                    error = %e,
                    "Existence changed under us, retrying upsert"
                );
                let retry = if exists {
                    self.store.insert(&self.id, blob)
                } else {
                    self.store.update(&self.id, blob)
                };
                retry.map_err(RecordError::from)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
