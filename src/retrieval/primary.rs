use std::sync::Arc;

use tracing::{debug, instrument};

use crate::catalog::ScoredMovie;
use crate::constants::MIN_ANN_CANDIDATES;
use crate::store::{DocumentStore, StoreError};

/// Vector index tier: delegates ranking to the external ANN index.
pub struct PrimarySearch<S: DocumentStore> {
    store: Arc<S>,
    oversample_factor: u64,
}

impl<S: DocumentStore> std::fmt::Debug for PrimarySearch<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimarySearch")
            .field("oversample_factor", &self.oversample_factor)
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore> PrimarySearch<S> {
    pub fn new(store: Arc<S>, oversample_factor: u64) -> Self {
        Self {
            store,
            oversample_factor,
        }
    }

    /// Issues the ANN query with an oversampled candidate set.
    ///
    /// Any error is an availability fault of this tier; the caller falls back
    /// rather than surfacing it. Zero hits is a successful empty result,
    /// distinct from an error.
    #[instrument(skip(self, query), fields(limit = limit))]
    pub async fn search(&self, query: &[f32], limit: usize) -> Result<Vec<ScoredMovie>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let candidates = (limit as u64)
            .saturating_mul(self.oversample_factor)
            .max(MIN_ANN_CANDIDATES);

        debug!(candidates, "issuing vector index query");
        self.store.ann_search(query.to_vec(), limit as u64, candidates).await
    }
}
