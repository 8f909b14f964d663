use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{Document, Record};

/// A fully populated catalog entry. This is the shape the client's
/// submission gate produces; the store itself accepts any document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: f64,
}

impl Book {
    /// Document body for a create or replace request.
    pub fn into_document(self) -> Document {
        let mut fields = Document::new();
        fields.insert("title".to_string(), Value::String(self.title));
        fields.insert("author".to_string(), Value::String(self.author));
        fields.insert("genre".to_string(), Value::String(self.genre));
        fields.insert("price".to_string(), Value::from(self.price));
        fields
    }

    /// Typed view of a record, if all four fields are present.
    pub fn from_record(record: &Record) -> Option<Book> {
        Some(Book {
            title: record.title()?.to_string(),
            author: record.author()?.to_string(),
            genre: record.genre()?.to_string(),
            price: record.price()?,
        })
    }
}
