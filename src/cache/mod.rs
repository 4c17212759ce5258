//! Generation-versioned result cache.
//!
//! Every cached result set is keyed by a fingerprint that hashes in the
//! current cache generation. Catalog mutations bump the generation, which
//! bulk-invalidates all prior entries without enumerating keys: they stay in
//! the store until their TTL expires but are no longer addressable.
//!
//! The cache never turns an availability fault into a user-visible error:
//! reads fail open to a miss, writes are best-effort.

pub mod backend;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use backend::{CacheBackend, MemoryBackend};
pub use error::{CacheError, CacheResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCacheBackend;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::ScoredMovie;
use crate::constants::GENERATION_KEY;

/// Fail-open wrapper over a [`CacheBackend`] for ranked search results.
pub struct SearchCache<B: CacheBackend> {
    backend: Arc<B>,
}

impl<B: CacheBackend> Clone for SearchCache<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: CacheBackend> std::fmt::Debug for SearchCache<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCache").finish_non_exhaustive()
    }
}

impl<B: CacheBackend> SearchCache<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_arc(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads the active cache generation.
    ///
    /// `None` means the backing store is unreachable; callers treat the cache
    /// as disabled for the current call.
    pub async fn generation(&self) -> Option<u64> {
        match self.backend.read_counter(GENERATION_KEY).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                warn!(error = %e, "cache generation read failed, disabling cache for this call");
                None
            }
        }
    }

    /// Atomically increments the generation, invalidating all cached results.
    ///
    /// Callers on the mutation path log a failure and proceed; staleness is
    /// then bounded by the entry TTL.
    pub async fn bump(&self) -> CacheResult<u64> {
        let generation = self.backend.incr(GENERATION_KEY).await?;
        debug!(generation, "cache generation bumped");
        Ok(generation)
    }

    /// Looks up a ranked result set. Any backend or payload fault is a miss.
    pub async fn get(&self, fingerprint: &str) -> Option<Vec<ScoredMovie>> {
        let raw = match self.backend.get(fingerprint).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, fingerprint, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(hits) => Some(hits),
            Err(e) => {
                warn!(error = %e, fingerprint, "cached payload unreadable, treating as miss");
                None
            }
        }
    }

    /// Writes a ranked result set. Best-effort: failures are logged, never
    /// propagated.
    pub async fn put(&self, fingerprint: &str, hits: &[ScoredMovie], ttl: Duration) {
        let payload = match serde_json::to_string(hits) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "failed to serialize result set for caching");
                return;
            }
        };

        if let Err(e) = self.backend.put(fingerprint, payload, ttl).await {
            warn!(error = %e, fingerprint, "cache write failed");
        }
    }
}
