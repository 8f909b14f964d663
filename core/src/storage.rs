use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{MutationError, RetrievalError};
use crate::record::{CollectionId, Document, Record, RecordId};

#[async_trait]
pub trait StorageEngine: Send + Sync {
    // Opens and/or creates a storage collection.
    async fn collection(&self, id: &CollectionId) -> Result<Arc<dyn StorageCollection>, RetrievalError>;
}

/// A named set of documents. Each operation maps to a single store write or
/// read; the engine guarantees per-document atomicity and nothing more.
#[async_trait]
pub trait StorageCollection: Send + Sync {
    /// Persist a new document under a freshly assigned id.
    async fn insert(&self, fields: Document) -> Result<Record, MutationError>;

    async fn get(&self, id: RecordId) -> Result<Record, RetrievalError>;

    /// All records in key order. Ids are time-ordered, so this is creation order.
    async fn list(&self) -> Result<Vec<Record>, RetrievalError>;

    /// Whole-document replacement. Fields absent from `fields` are dropped,
    /// never merged.
    async fn replace(&self, id: RecordId, fields: Document) -> Result<Record, MutationError>;

    /// Remove the record stored under `id` and return it.
    async fn remove(&self, id: RecordId) -> Result<Record, MutationError>;
}

/// Storage handle for a collection without any knowledge of the model type
#[derive(Clone)]
pub struct StorageCollectionWrapper(Arc<dyn StorageCollection>);

impl StorageCollectionWrapper {
    pub fn new(bucket: Arc<dyn StorageCollection>) -> Self { Self(bucket) }
}

impl std::ops::Deref for StorageCollectionWrapper {
    type Target = Arc<dyn StorageCollection>;
    fn deref(&self) -> &Self::Target { &self.0 }
}
