use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::model::{Identity, Movie, MovieSummary, NewMovie, Role};
use crate::cache::{CacheBackend, SearchCache};
use crate::embedding::{EmbeddingError, QueryEmbedder};
use crate::store::{DocumentStore, StoreError};

#[derive(Debug, Error)]
/// Errors returned by catalog mutations.
pub enum CatalogError {
    /// The caller lacks the required role.
    #[error("operation requires the admin role (caller role: {role})")]
    Forbidden {
        /// Role the caller actually has.
        role: Role,
    },

    /// The movie carries no text to embed.
    #[error("movie has no text to embed")]
    EmptyDocument,

    /// Embedding generation failed.
    #[error("embedding generation failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Document store error.
    #[error("document store error: {0}")]
    Store(#[from] StoreError),
}

/// Catalog mutation service: embed on write, then invalidate cached searches.
///
/// Every mutation takes the caller [`Identity`] explicitly; there is no
/// ambient user context. The generation bump happens before the mutation is
/// acknowledged to the caller, so later searches never serve pre-mutation
/// cached rankings beyond the fail-open window.
pub struct CatalogService<S: DocumentStore, B: CacheBackend> {
    store: Arc<S>,
    embedder: Arc<QueryEmbedder>,
    cache: Option<SearchCache<B>>,
}

impl<S: DocumentStore, B: CacheBackend> std::fmt::Debug for CatalogService<S, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("cache_enabled", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore, B: CacheBackend> CatalogService<S, B> {
    pub fn new(
        store: Arc<S>,
        embedder: Arc<QueryEmbedder>,
        cache: Option<SearchCache<B>>,
    ) -> Self {
        Self {
            store,
            embedder,
            cache,
        }
    }

    fn require_admin(identity: &Identity) -> Result<(), CatalogError> {
        if identity.is_admin() {
            Ok(())
        } else {
            Err(CatalogError::Forbidden {
                role: identity.role,
            })
        }
    }

    /// Inserts a movie, embedding its descriptive text, and invalidates
    /// cached search results.
    #[instrument(skip(self, identity, new), fields(subject = %identity.subject, title = %new.title))]
    pub async fn add_movie(
        &self,
        identity: &Identity,
        new: NewMovie,
    ) -> Result<MovieSummary, CatalogError> {
        Self::require_admin(identity)?;

        let mut movie = Movie {
            id: Uuid::new_v4(),
            title: new.title,
            year: new.year,
            director: new.director,
            genres: new.genres,
            description: new.description,
            cast: new.cast,
            poster_url: new.poster_url,
            rating: None,
            embedding: None,
        };

        let vector = self
            .embedder
            .embed(&movie.embedding_text())?
            .ok_or(CatalogError::EmptyDocument)?;
        movie.embedding = Some(vector);

        let summary = movie.summary();
        self.store.upsert(vec![movie]).await?;
        self.invalidate().await;

        info!(movie_id = %summary.id, "movie added");
        Ok(summary)
    }

    /// Deletes a movie and invalidates cached search results.
    #[instrument(skip(self, identity), fields(subject = %identity.subject, movie_id = %id))]
    pub async fn delete_movie(&self, identity: &Identity, id: Uuid) -> Result<(), CatalogError> {
        Self::require_admin(identity)?;

        self.store.delete(vec![id]).await?;
        self.invalidate().await;

        info!("movie deleted");
        Ok(())
    }

    /// Bumps the cache generation. Failure is logged, not propagated: the
    /// mutation already happened, and stale entries age out by TTL.
    async fn invalidate(&self) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.bump().await {
            error!(error = %e, "cache generation bump failed; stale results may persist until TTL");
        }
    }
}
