use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use super::client::DocumentStore;
use super::error::StoreError;
use crate::catalog::{Movie, MovieCandidate, MovieFilter, MovieSummary, ScoredMovie};
use crate::retrieval::ranking::cosine_similarity;

/// In-memory document store preserving insertion order.
///
/// `ann_search` ranks by exact cosine similarity over the stored vectors.
/// The `fail_*` toggles simulate an unavailable index / unreachable store;
/// call counters let tests assert which tier actually ran.
#[derive(Default)]
pub struct MockMovieStore {
    movies: RwLock<Vec<Movie>>,
    ensured_size: Mutex<Option<u64>>,
    fail_search: AtomicBool,
    fail_scan: AtomicBool,
    search_calls: AtomicUsize,
    scan_calls: AtomicUsize,
}

impl MockMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
            ..Self::default()
        }
    }

    /// Makes `ann_search` fail, as when the index feature is unavailable.
    pub fn set_fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    /// Makes `scan` fail, as when the store is unreachable.
    pub fn set_fail_scan(&self, fail: bool) {
        self.fail_scan.store(fail, Ordering::SeqCst);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    pub fn movie_count(&self) -> usize {
        self.movies.read().len()
    }

    fn matches(filter: &MovieFilter, movie: &Movie) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(title) = &filter.title {
            if !contains_ci(&movie.title, title) {
                return false;
            }
        }
        if let Some(director) = &filter.director {
            if !contains_ci(&movie.director, director) {
                return false;
            }
        }
        if let Some(genre) = &filter.genre {
            if !movie.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
                return false;
            }
        }
        if let Some(year) = filter.year {
            if movie.year != year {
                return false;
            }
        }
        true
    }
}

impl DocumentStore for MockMovieStore {
    async fn is_ready(&self) -> bool {
        true
    }

    async fn ensure_collection(&self, vector_size: u64) -> Result<(), StoreError> {
        let mut ensured = self.ensured_size.lock();
        match *ensured {
            Some(existing) if existing != vector_size => Err(StoreError::InvalidDimension {
                expected: vector_size as usize,
                actual: existing as usize,
            }),
            _ => {
                *ensured = Some(vector_size);
                Ok(())
            }
        }
    }

    async fn ann_search(
        &self,
        query: Vec<f32>,
        limit: u64,
        _candidates: u64,
    ) -> Result<Vec<ScoredMovie>, StoreError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_search.load(Ordering::SeqCst) {
            return Err(StoreError::SearchFailed {
                collection: "movies".to_string(),
                message: "vector index unavailable".to_string(),
            });
        }

        let mut hits: Vec<ScoredMovie> = self
            .movies
            .read()
            .iter()
            .filter_map(|movie| {
                let embedding = movie.embedding.as_ref()?;
                Some(ScoredMovie {
                    movie: movie.summary(),
                    score: cosine_similarity(&query, embedding),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit as usize);

        Ok(hits)
    }

    async fn scan(&self, cap: u32) -> Result<Vec<MovieCandidate>, StoreError> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_scan.load(Ordering::SeqCst) {
            return Err(StoreError::ScanFailed {
                collection: "movies".to_string(),
                message: "store unreachable".to_string(),
            });
        }

        Ok(self
            .movies
            .read()
            .iter()
            .take(cap as usize)
            .map(|movie| MovieCandidate {
                summary: movie.summary(),
                embedding: movie.embedding.clone(),
            })
            .collect())
    }

    async fn filter_scan(
        &self,
        filter: &MovieFilter,
        limit: u32,
    ) -> Result<Vec<MovieSummary>, StoreError> {
        Ok(self
            .movies
            .read()
            .iter()
            .filter(|movie| Self::matches(filter, movie))
            .take(limit as usize)
            .map(Movie::summary)
            .collect())
    }

    async fn upsert(&self, movies: Vec<Movie>) -> Result<(), StoreError> {
        let mut stored = self.movies.write();
        for movie in movies {
            if let Some(existing) = stored.iter_mut().find(|m| m.id == movie.id) {
                *existing = movie;
            } else {
                stored.push(movie);
            }
        }
        Ok(())
    }

    async fn delete(&self, ids: Vec<Uuid>) -> Result<(), StoreError> {
        self.movies.write().retain(|movie| !ids.contains(&movie.id));
        Ok(())
    }
}
