use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

use crate::error::DecodeError;

/// Store-assigned identifier for a catalog record.
///
/// ULIDs are time-ordered, so iterating a collection in key order yields
/// records in creation order.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RecordId(Ulid);

impl RecordId {
    pub fn new() -> Self { RecordId(Ulid::new()) }

    pub fn from_bytes(bytes: [u8; 16]) -> Self { RecordId(Ulid::from_bytes(bytes)) }

    pub fn to_bytes(&self) -> [u8; 16] { self.0.to_bytes() }
}

impl Default for RecordId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "RecordId({})", self.0) }
}

impl FromStr for RecordId {
    type Err = DecodeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(RecordId(Ulid::from_string(s).map_err(|_| DecodeError::InvalidUlid)?)) }
}

impl TryFrom<&str> for RecordId {
    type Error = DecodeError;
    fn try_from(id: &str) -> Result<Self, Self::Error> { id.parse() }
}

impl TryFrom<String> for RecordId {
    type Error = DecodeError;
    fn try_from(id: String) -> Result<Self, Self::Error> { id.parse() }
}

/// Name of a document collection within a storage engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for CollectionId {
    fn from(name: &str) -> Self { CollectionId(name.to_string()) }
}

impl From<String> for CollectionId {
    fn from(name: String) -> Self { CollectionId(name) }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A loosely shaped document body. The store imposes no schema; whatever
/// fields arrive are stored and returned as-is, and replacement is always
/// whole-document.
pub type Document = serde_json::Map<String, Value>;

/// A persisted catalog record: a store-assigned id plus its document fields.
/// Serialized flat, as `{ "id": ..., <fields...> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Document,
}

impl Record {
    pub fn new(id: RecordId, fields: Document) -> Self { Record { id, fields } }

    // Conventional catalog fields. None of these are guaranteed present,
    // since the store accepts partial documents.
    pub fn title(&self) -> Option<&str> { self.fields.get("title").and_then(Value::as_str) }

    pub fn author(&self) -> Option<&str> { self.fields.get("author").and_then(Value::as_str) }

    pub fn genre(&self) -> Option<&str> { self.fields.get("genre").and_then(Value::as_str) }

    pub fn price(&self) -> Option<f64> { self.fields.get("price").and_then(Value::as_f64) }
}
