use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
/// Errors returned by document store operations.
pub enum StoreError {
    /// Could not connect to the store endpoint.
    #[error("failed to connect to document store at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Collection creation failed.
    #[error("failed to create collection '{collection}': {message}")]
    CreateCollectionFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// The vector index query failed or the feature is unavailable.
    ///
    /// Deliberately indistinguishable by variant from any other index-side
    /// fault: the orchestrator treats all of them as tier-unavailable and
    /// falls back. Distinct from zero results, which is an empty `Ok`.
    #[error("vector index search failed in '{collection}': {message}")]
    SearchFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// The bulk document scan failed.
    #[error("document scan failed in '{collection}': {message}")]
    ScanFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Upsert failed.
    #[error("failed to upsert documents into '{collection}': {message}")]
    UpsertFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// Delete failed.
    #[error("failed to delete documents from '{collection}': {message}")]
    DeleteFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// A document was written without a stored embedding.
    #[error("movie {id} has no embedding to index")]
    MissingEmbedding {
        /// Document id.
        id: Uuid,
    },

    /// Vector dimension mismatch.
    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
