use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by query embedding.
pub enum EmbeddingError {
    /// The embedding model failed to initialize.
    #[error("embedding model initialization failed: {reason}")]
    ModelInitFailed {
        /// Error message.
        reason: String,
    },

    /// Inference failed for a given input.
    #[error("embedding inference failed: {reason}")]
    InferenceFailed {
        /// Error message.
        reason: String,
    },

    /// The produced vector has the wrong dimensionality.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Invalid embedder configuration.
    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig {
        /// Error message.
        reason: String,
    },
}
