use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie document as held by the document store.
///
/// The stored embedding never leaves this type: every retrieval path projects
/// a [`MovieSummary`] out of it, which has no embedding field at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub genres: Vec<String>,
    pub description: String,
    pub cast: Vec<String>,
    pub poster_url: Option<String>,
    /// Aggregate rating, owned by the review subsystem; read-only here.
    pub rating: Option<f64>,
    pub embedding: Option<Vec<f32>>,
}

impl Movie {
    /// The text the embedder sees for this document.
    pub fn embedding_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.director,
            self.genres.join(" "),
            self.description
        )
    }

    /// Projects the caller-facing summary, dropping the embedding.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            year: self.year,
            director: self.director.clone(),
            genres: self.genres.clone(),
            description: self.description.clone(),
            cast: self.cast.clone(),
            poster_url: self.poster_url.clone(),
            rating: self.rating,
        }
    }
}

/// Caller-facing movie projection.
///
/// Deliberately has no embedding field: stripping is enforced by construction
/// rather than by remembering to clear a field before serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub genres: Vec<String>,
    pub description: String,
    pub cast: Vec<String>,
    pub poster_url: Option<String>,
    pub rating: Option<f64>,
}

/// A summary paired with a relevance score.
///
/// Ordering invariant: result lists are sorted by `score` descending, ties in
/// original retrieval order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMovie {
    #[serde(flatten)]
    pub movie: MovieSummary,
    pub score: f64,
}

/// A scanned document plus its stored vector, as loaded by the fallback path.
#[derive(Debug, Clone)]
pub struct MovieCandidate {
    pub summary: MovieSummary,
    pub embedding: Option<Vec<f32>>,
}

/// Input for catalog insertion; the service assigns the id and embedding.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

/// Exact/filtered lookup parameters (the non-semantic search path).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl MovieFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.director.is_none()
            && self.genre.is_none()
            && self.year.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Caller identity, passed explicitly to every operation that needs it.
///
/// Authentication happens upstream; this type only carries the resolved
/// subject and role so authorization checks are visible at the call site.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub role: Role,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
