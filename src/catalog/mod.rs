//! Movie catalog model and mutation service.
//!
//! - [`model`] defines the document types and the caller-facing projections.
//! - [`service`] applies catalog mutations (embed, upsert, invalidate).

pub mod model;
pub mod service;

#[cfg(test)]
mod tests;

pub use model::{
    Identity, Movie, MovieCandidate, MovieFilter, MovieSummary, NewMovie, Role, ScoredMovie,
};
pub use service::{CatalogError, CatalogService};
