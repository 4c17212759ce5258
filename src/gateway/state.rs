use std::sync::Arc;

use crate::cache::CacheBackend;
use crate::catalog::CatalogService;
use crate::search::SearchEngine;
use crate::store::DocumentStore;

/// Shared state for gateway handlers.
pub struct HandlerState<S: DocumentStore, B: CacheBackend> {
    pub engine: Arc<SearchEngine<S, B>>,
    pub catalog: Arc<CatalogService<S, B>>,
    pub store: Arc<S>,
}

impl<S: DocumentStore, B: CacheBackend> HandlerState<S, B> {
    pub fn new(
        engine: Arc<SearchEngine<S, B>>,
        catalog: Arc<CatalogService<S, B>>,
        store: Arc<S>,
    ) -> Self {
        Self {
            engine,
            catalog,
            store,
        }
    }
}

impl<S: DocumentStore, B: CacheBackend> Clone for HandlerState<S, B> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            catalog: Arc::clone(&self.catalog),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore, B: CacheBackend> std::fmt::Debug for HandlerState<S, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerState").finish_non_exhaustive()
    }
}
