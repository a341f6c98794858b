// Keyslot: Record Module
//
// The decoded view of the stored record: a map of string keys to tagged
// attribute values, and the codec that turns it into the opaque blob handed
// to the secure store.

mod codec;
mod error;
mod models;

pub use codec::{decode_attributes, encode_attributes};
pub use error::RecordError;
pub use models::{
    AttributeMap, AttributeValue, FromAttribute, Lookup, RecordState, ValueKind, MAX_NESTING_DEPTH,
};
