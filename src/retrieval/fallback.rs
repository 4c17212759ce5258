use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::catalog::ScoredMovie;
use crate::store::{DocumentStore, StoreError};

use super::ranking::rank_candidates;

/// Result of a fallback scan.
///
/// The empty cases are explicit outcomes, not errors: the orchestrator maps
/// them to an empty ranked list. Only a failed scan is an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackOutcome {
    /// Ranked results, sorted by similarity descending.
    Ranked(Vec<ScoredMovie>),
    /// The catalog holds no documents at all.
    EmptyCatalog,
    /// Documents exist but none carries a stored embedding.
    NoEmbeddings,
}

/// Brute-force tier: bounded scan plus exact in-memory cosine scoring.
pub struct FallbackSearch<S: DocumentStore> {
    store: Arc<S>,
    scan_cap: u32,
}

impl<S: DocumentStore> std::fmt::Debug for FallbackSearch<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSearch")
            .field("scan_cap", &self.scan_cap)
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore> FallbackSearch<S> {
    pub fn new(store: Arc<S>, scan_cap: u32) -> Self {
        Self { store, scan_cap }
    }

    #[instrument(skip(self, query), fields(limit = limit, scan_cap = self.scan_cap))]
    pub async fn search(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<FallbackOutcome, StoreError> {
        let candidates = self.store.scan(self.scan_cap).await?;

        if candidates.is_empty() {
            debug!("scan returned no documents");
            return Ok(FallbackOutcome::EmptyCatalog);
        }

        let total = candidates.len();
        let with_embeddings = candidates
            .iter()
            .filter(|c| c.embedding.is_some())
            .count();

        if with_embeddings == 0 {
            warn!(scanned = total, "no scanned document carries an embedding");
            return Ok(FallbackOutcome::NoEmbeddings);
        }

        if with_embeddings < total {
            debug!(
                skipped = total - with_embeddings,
                "dropping candidates without stored embeddings"
            );
        }

        let ranked = rank_candidates(query, candidates, limit);

        info!(
            scanned = total,
            scored = with_embeddings,
            returned = ranked.len(),
            best_score = ranked.first().map(|hit| hit.score),
            "scan fallback complete"
        );

        Ok(FallbackOutcome::Ranked(ranked))
    }
}
