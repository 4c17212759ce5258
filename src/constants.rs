//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Dimension Invariants
//!
//! The embedding dimension is treated as an invariant across modules
//! (embedding, store, retrieval). The query embedder and the movie collection
//! must agree on it; [`validate_embedding_dim`] catches mismatches at startup
//! instead of deep inside a retrieval call.

/// Output dimension of paraphrase-multilingual-MiniLM-L12-v2.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_COLLECTION_NAME: &str = "movies";

/// Counter key under which the cache generation lives.
pub const GENERATION_KEY: &str = "movies:generation";

pub const DEFAULT_RESULT_TTL_SECS: u64 = 86_400;

/// Upper bound on documents loaded by the scan fallback.
pub const DEFAULT_SCAN_CAP: u32 = 1_000;

/// Candidate oversampling multiplier for the vector index query.
pub const DEFAULT_OVERSAMPLE_FACTOR: u64 = 10;

/// Floor on the candidate set regardless of the requested limit.
pub const MIN_ANN_CANDIDATES: u64 = 100;

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

pub const MAX_SEARCH_LIMIT: usize = 50;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this at module boundaries (embedder vs. collection) to catch mismatched
/// deployments early. A mismatch is a configuration error, not a condition to
/// recover from at query time.
pub fn validate_embedding_dim(expected: usize, actual: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if expected != actual {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_embedding_dim_accepts_match() {
        assert!(validate_embedding_dim(DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_DIM).is_ok());
    }

    #[test]
    fn test_validate_embedding_dim_rejects_mismatch() {
        let err = validate_embedding_dim(384, 768).unwrap_err();
        assert_eq!(
            err,
            DimValidationError::DimensionMismatch {
                expected: 384,
                actual: 768
            }
        );
    }

    #[test]
    fn test_validate_embedding_dim_rejects_zero() {
        assert_eq!(
            validate_embedding_dim(0, 0),
            Err(DimValidationError::ZeroDimension)
        );
    }
}
