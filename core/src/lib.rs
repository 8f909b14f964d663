pub mod error;
pub mod model;
pub mod record;
pub mod storage;

pub use error::{DecodeError, MutationError, RetrievalError};
pub use model::Book;
pub use record::{CollectionId, Document, Record, RecordId};
pub use storage::{StorageCollection, StorageCollectionWrapper, StorageEngine};
