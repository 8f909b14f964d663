use thiserror::Error;

use libris_core::{Book, Record};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("All fields are required.")]
    MissingField,
    #[error("Price must be a number.")]
    InvalidPrice,
}

/// Not-yet-submitted form values. Everything is free text until the
/// submission gate turns it into a typed [`Book`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: String,
}

impl Draft {
    /// Draft pre-filled with a record's current displayed values.
    pub fn from_record(record: &Record) -> Self {
        Draft {
            title: record.title().unwrap_or_default().to_string(),
            author: record.author().unwrap_or_default().to_string(),
            genre: record.genre().unwrap_or_default().to_string(),
            price: record.price().map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) { *self = Draft::default(); }

    /// The submission gate: every field present, price numeric. A failing
    /// draft is left untouched for the user to fix.
    pub fn validate(&self) -> Result<Book, FormError> {
        if self.title.is_empty() || self.author.is_empty() || self.genre.is_empty() || self.price.is_empty() {
            return Err(FormError::MissingField);
        }
        let price = self.price.trim().parse::<f64>().map_err(|_| FormError::InvalidPrice)?;

        Ok(Book { title: self.title.clone(), author: self.author.clone(), genre: self.genre.clone(), price })
    }
}
