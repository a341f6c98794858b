// Keyslot: Attribute data models
//
// Every value carries an explicit kind discriminant when encoded, so a blob
// decodes back to exactly the variants that were written.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The decoded attribute blob. Ordered so the encoded form is deterministic.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Deepest value nesting accepted on write. Each array or dictionary level
/// costs two JSON levels once tagged, and the decoder stops at 128, so this
/// keeps every accepted write readable.
pub const MAX_NESTING_DEPTH: usize = 32;

/// A single value stored under a key in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    Bool(bool),
    String(String),
    Array(Vec<AttributeValue>),
    Dictionary(AttributeMap),
    Date(DateTime<Utc>),
}

impl AttributeValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Dictionary(_) => ValueKind::Dictionary,
            Self::Date(_) => ValueKind::Date,
        }
    }

    /// Nesting depth: 1 for scalars and empty containers.
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Dictionary(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
            _ => 1,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        Self::Array(value)
    }
}

impl From<AttributeMap> for AttributeValue {
    fn from(value: AttributeMap) -> Self {
        Self::Dictionary(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Discriminant of an [`AttributeValue`], used in logs and mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    String,
    Array,
    Dictionary,
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Array => "array",
            Self::Dictionary => "dictionary",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// Typed extraction from an [`AttributeValue`].
pub trait FromAttribute: Sized {
    const KIND: ValueKind;

    /// Unwrap the matching variant, or hand back the kind actually found.
    fn from_attribute(value: AttributeValue) -> Result<Self, ValueKind>;
}

impl FromAttribute for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_attribute(value: AttributeValue) -> Result<Self, ValueKind> {
        match value {
            AttributeValue::Bool(b) => Ok(b),
            other => Err(other.kind()),
        }
    }
}

impl FromAttribute for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_attribute(value: AttributeValue) -> Result<Self, ValueKind> {
        match value {
            AttributeValue::String(s) => Ok(s),
            other => Err(other.kind()),
        }
    }
}

impl FromAttribute for Vec<AttributeValue> {
    const KIND: ValueKind = ValueKind::Array;

    fn from_attribute(value: AttributeValue) -> Result<Self, ValueKind> {
        match value {
            AttributeValue::Array(items) => Ok(items),
            other => Err(other.kind()),
        }
    }
}

impl FromAttribute for AttributeMap {
    const KIND: ValueKind = ValueKind::Dictionary;

    fn from_attribute(value: AttributeValue) -> Result<Self, ValueKind> {
        match value {
            AttributeValue::Dictionary(map) => Ok(map),
            other => Err(other.kind()),
        }
    }
}

impl FromAttribute for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Date;

    fn from_attribute(value: AttributeValue) -> Result<Self, ValueKind> {
        match value {
            AttributeValue::Date(date) => Ok(date),
            other => Err(other.kind()),
        }
    }
}

/// Outcome of a read that distinguishes a missing key from an unreadable one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// The blob did not decode, or the key holds a value of another kind.
    DecodeError(String),
}

/// Whether the record currently exists in the secure store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Absent,
    Present,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
