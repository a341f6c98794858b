// Keyslot: Library root
//
// Re-exports the accessor, backend, record, config and CLI modules.

pub mod accessor;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod record;

pub use accessor::CredentialRecord;
pub use backend::{BackendError, KeyringRecordStore, MemoryRecordStore, RecordId, RecordStore};
pub use config::RecordConfig;
pub use error::{KeyslotError, Result};
pub use record::{AttributeMap, AttributeValue, Lookup, RecordError, RecordState, ValueKind};
