//! The two interchangeable retrieval strategies.
//!
//! - [`primary`] queries the external vector index with candidate
//!   oversampling.
//! - [`fallback`] bulk-loads a bounded document set and scores it in memory.
//! - [`ranking`] holds the exact cosine scoring both the fallback and the
//!   mock store use.

pub mod fallback;
pub mod primary;
pub mod ranking;

#[cfg(test)]
mod tests;

pub use fallback::{FallbackOutcome, FallbackSearch};
pub use primary::PrimarySearch;
pub use ranking::{cosine_similarity, rank_candidates};
