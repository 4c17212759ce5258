//! Cinesearch library crate (used by the server and integration tests).
//!
//! Semantic movie search over an externally indexed document store, with a
//! generation-versioned result cache and a brute-force in-memory fallback.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Movie`], [`MovieSummary`], [`ScoredMovie`] - Catalog model and
//!   embedding-free projections
//! - [`SearchEngine`], [`SearchConfig`], [`SearchOutcome`] - Orchestration
//!
//! ## Retrieval Tiers
//! - [`PrimarySearch`] - Vector index query with candidate oversampling
//! - [`FallbackSearch`], [`FallbackOutcome`] - Bounded scan + exact cosine
//!
//! ## Caching
//! - [`SearchCache`], [`CacheBackend`], [`MemoryBackend`] - Generation-
//!   versioned result cache over a pluggable key/value backend
//!
//! ## Collaborator Seams
//! - [`DocumentStore`], [`QdrantMovieStore`] - Document store access
//! - [`QueryEmbedder`], [`EmbedderConfig`] - Query embedding
//! - [`CatalogService`], [`Identity`] - Mutations with explicit authorization
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod retrieval;
pub mod search;
pub mod store;

pub use cache::{CacheBackend, CacheError, MemoryBackend, SearchCache};
#[cfg(any(test, feature = "mock"))]
pub use cache::MockCacheBackend;

pub use catalog::{
    CatalogError, CatalogService, Identity, Movie, MovieCandidate, MovieFilter, MovieSummary,
    NewMovie, Role, ScoredMovie,
};

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_DIM, DimValidationError, validate_embedding_dim,
};
pub use embedding::{EmbedderConfig, EmbeddingError, QueryEmbedder};
pub use gateway::{GatewayError, HandlerState, create_router};
pub use hashing::{fingerprint, normalize_query};
pub use retrieval::{
    FallbackOutcome, FallbackSearch, PrimarySearch, cosine_similarity, rank_candidates,
};
pub use search::{
    SEARCH_SOURCE_HEADER, SearchConfig, SearchEngine, SearchError, SearchOutcome, SearchSource,
};
pub use store::{DocumentStore, QdrantMovieStore, StoreError};
#[cfg(any(test, feature = "mock"))]
pub use store::MockMovieStore;
