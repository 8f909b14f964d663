use std::{ops::Deref, sync::Arc};

use libris_core::storage::StorageCollectionWrapper;

#[derive(Clone)]
pub struct AppState(Arc<AppStateInner>);

pub struct AppStateInner {
    pub books: StorageCollectionWrapper,
}

impl AppState {
    pub fn new(books: StorageCollectionWrapper) -> Self { Self(Arc::new(AppStateInner { books })) }
}

impl Deref for AppState {
    type Target = Arc<AppStateInner>;
    fn deref(&self) -> &Self::Target { &self.0 }
}
