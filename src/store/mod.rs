//! Qdrant document store integration.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;

#[cfg(test)]
mod tests;

pub use client::{DocumentStore, QdrantMovieStore};
pub use error::StoreError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockMovieStore;
