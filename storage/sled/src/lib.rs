use async_trait::async_trait;
use sled::{Config, Db};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::task;
use tracing::warn;

use libris_core::{
    error::{MutationError, RetrievalError},
    record::{CollectionId, Document, Record, RecordId},
    storage::{StorageCollection, StorageEngine},
};

pub struct SledStorageEngine {
    pub db: Db,
}

impl SledStorageEngine {
    pub fn with_homedir_folder(folder_name: &str) -> anyhow::Result<Self> {
        let dir = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?.join(folder_name);

        Self::with_path(dir)
    }

    pub fn with_path(path: PathBuf) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&path)?;
        let dbpath = path.join("sled");
        let db = sled::open(&dbpath)?;
        Ok(Self { db })
    }

    pub fn new() -> anyhow::Result<Self> { Self::with_homedir_folder(".libris") }

    pub fn new_test() -> anyhow::Result<Self> {
        let db = Config::new().temporary(true).flush_every_ms(None).open()?;

        Ok(Self { db })
    }
}

pub struct SledStorageCollection {
    pub collection_id: CollectionId,
    pub tree: sled::Tree,
}

impl SledStorageCollection {
    fn decode(id: RecordId, bytes: &[u8]) -> Result<Record, serde_json::Error> {
        let fields: Document = serde_json::from_slice(bytes)?;
        Ok(Record::new(id, fields))
    }
}

#[async_trait]
impl StorageEngine for SledStorageEngine {
    async fn collection(&self, id: &CollectionId) -> Result<Arc<dyn StorageCollection>, RetrievalError> {
        let tree = self.db.open_tree(id.as_str()).map_err(SledRetrievalError::StorageError)?;
        Ok(Arc::new(SledStorageCollection { collection_id: id.clone(), tree }))
    }
}

#[async_trait]
impl StorageCollection for SledStorageCollection {
    async fn insert(&self, fields: Document) -> Result<Record, MutationError> {
        let tree = self.tree.clone();
        let id = RecordId::new();
        let bytes = serde_json::to_vec(&fields)?;

        // Use spawn_blocking since sled operations are not async
        task::spawn_blocking(move || {
            tree.insert(id.to_bytes(), bytes).map_err(|err| MutationError::UpdateFailed(Box::new(err)))?;
            Ok::<(), MutationError>(())
        })
        .await
        .map_err(|e| MutationError::General(Box::new(e)))??;

        Ok(Record::new(id, fields))
    }

    async fn get(&self, id: RecordId) -> Result<Record, RetrievalError> {
        let tree = self.tree.clone();

        let result = task::spawn_blocking(move || tree.get(id.to_bytes()))
            .await
            .map_err(|e| RetrievalError::StorageError(Box::new(e)))?
            .map_err(SledRetrievalError::StorageError)?;

        match result {
            Some(ivec) => Ok(Self::decode(id, &ivec)?),
            None => Err(SledRetrievalError::RecordNotFound(id).into()),
        }
    }

    async fn list(&self) -> Result<Vec<Record>, RetrievalError> {
        let tree = self.tree.clone();

        task::spawn_blocking(move || -> Result<Vec<Record>, RetrievalError> {
            let mut records = Vec::new();
            for item in tree.iter() {
                let (key_bytes, value_bytes) = item.map_err(SledRetrievalError::StorageError)?;
                let id = RecordId::from_bytes(key_bytes.as_ref().try_into().map_err(RetrievalError::storage)?);
                records.push(Self::decode(id, &value_bytes)?);
            }
            Ok(records)
        })
        .await
        .map_err(|e| RetrievalError::StorageError(Box::new(e)))?
    }

    async fn replace(&self, id: RecordId, fields: Document) -> Result<Record, MutationError> {
        let tree = self.tree.clone();
        let bytes = serde_json::to_vec(&fields)?;

        task::spawn_blocking(move || {
            let prev = tree.insert(id.to_bytes(), bytes).map_err(|err| MutationError::UpdateFailed(Box::new(err)))?;
            if prev.is_none() {
                // the id was never present; undo the speculative write
                warn!("replace of missing record {}", id);
                tree.remove(id.to_bytes()).map_err(|err| MutationError::UpdateFailed(Box::new(err)))?;
                return Err(MutationError::NotFound(id));
            }
            Ok(())
        })
        .await
        .map_err(|e| MutationError::General(Box::new(e)))??;

        Ok(Record::new(id, fields))
    }

    async fn remove(&self, id: RecordId) -> Result<Record, MutationError> {
        let tree = self.tree.clone();

        let prev = task::spawn_blocking(move || tree.remove(id.to_bytes()))
            .await
            .map_err(|e| MutationError::General(Box::new(e)))?
            .map_err(|err| MutationError::UpdateFailed(Box::new(err)))?;

        match prev {
            Some(ivec) => Ok(Self::decode(id, &ivec)?),
            None => Err(MutationError::NotFound(id)),
        }
    }
}

#[derive(Error, Debug)]
pub enum SledRetrievalError {
    #[error("storage error: {0}")]
    StorageError(#[from] sled::Error),
    #[error("record {0} not found")]
    RecordNotFound(RecordId),
}

impl From<SledRetrievalError> for RetrievalError {
    fn from(err: SledRetrievalError) -> Self {
        match err {
            SledRetrievalError::StorageError(e) => RetrievalError::StorageError(Box::new(e)),
            SledRetrievalError::RecordNotFound(id) => RetrievalError::NotFound(id),
        }
    }
}
