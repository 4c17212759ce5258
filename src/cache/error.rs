use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by cache backends.
///
/// These never reach a caller: every read path fails open to a miss and every
/// write path is best-effort. They exist so fail-open sites can log a cause.
pub enum CacheError {
    /// The backing store rejected or failed the operation.
    #[error("cache backend error: {message}")]
    Backend {
        /// Error message.
        message: String,
    },

    /// A cached payload could not be (de)serialized.
    #[error("cache payload serialization failed: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
