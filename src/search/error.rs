use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::store::StoreError;

#[derive(Debug, Error)]
/// Caller-facing search failures.
///
/// Cache faults and primary-tier faults never appear here; they are recovered
/// internally (fail-open miss, tier fallback). What remains is "could not
/// compute": embedder failures and a failing last tier.
pub enum SearchError {
    /// Query embedding failed.
    #[error("embedding generation failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The fallback tier could not load documents.
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] StoreError),

    /// A stage exceeded its independent timeout.
    #[error("{stage} timed out after {timeout_ms} ms")]
    Timeout {
        /// Stage name (`embed`, `scan`).
        stage: &'static str,
        /// Timeout in milliseconds.
        timeout_ms: u64,
    },
}
