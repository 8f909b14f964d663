use thiserror::Error;

use crate::record::RecordId;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("record {0} not found")]
    NotFound(RecordId),
    #[error("storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),
}

impl RetrievalError {
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self { RetrievalError::StorageError(Box::new(err)) }
}

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("record {0} not found")]
    NotFound(RecordId),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("update failed: {0}")]
    UpdateFailed(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("general error: {0}")]
    General(Box<dyn std::error::Error + Send + Sync + 'static>),
}

#[derive(Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error("invalid record id")]
    InvalidUlid,
}
