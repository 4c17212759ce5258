use std::sync::Arc;

use uuid::Uuid;

use super::fallback::{FallbackOutcome, FallbackSearch};
use super::primary::PrimarySearch;
use super::ranking::{cosine_similarity, rank_candidates};
use crate::catalog::{Movie, MovieCandidate, MovieSummary};
use crate::store::MockMovieStore;

fn summary(title: &str) -> MovieSummary {
    MovieSummary {
        id: Uuid::new_v4(),
        title: title.to_string(),
        year: 2000,
        director: "Test Director".to_string(),
        genres: Vec::new(),
        description: String::new(),
        cast: Vec::new(),
        poster_url: None,
        rating: None,
    }
}

fn candidate(title: &str, embedding: Option<Vec<f32>>) -> MovieCandidate {
    MovieCandidate {
        summary: summary(title),
        embedding,
    }
}

fn movie(title: &str, embedding: Option<Vec<f32>>) -> Movie {
    Movie {
        id: Uuid::new_v4(),
        title: title.to_string(),
        year: 2000,
        director: "Test Director".to_string(),
        genres: Vec::new(),
        description: String::new(),
        cast: Vec::new(),
        poster_url: None,
        rating: None,
        embedding,
    }
}

#[test]
fn test_cosine_similarity_identical_vectors() {
    let v = vec![0.3, -0.5, 0.8];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_orthogonal_vectors() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
}

#[test]
fn test_cosine_similarity_opposite_vectors() {
    let score = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]);
    assert!((score + 1.0).abs() < 1e-12);
}

#[test]
fn test_cosine_similarity_is_symmetric_and_bounded() {
    let pairs = [
        (vec![1.0, 0.0, 0.0], vec![0.5, 0.5, 0.0]),
        (vec![-0.3, 0.9, 0.1], vec![0.2, -0.7, 0.4]),
        (vec![2.0, 2.0, 2.0], vec![1.0, 1.0, 1.0]),
    ];

    for (a, b) in pairs {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        assert!((ab - ba).abs() < 1e-12);
        assert!((-1.0..=1.0).contains(&ab));
    }
}

#[test]
fn test_cosine_similarity_zero_norm_is_zero() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
}

#[test]
fn test_cosine_similarity_length_mismatch_is_zero() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
}

#[test]
fn test_rank_candidates_space_adventure_scenario() {
    // Four documents against query (1,0): doc1 exact match, doc3 close,
    // doc2 orthogonal, doc4 zero-norm scored 0 and tied after doc2.
    let candidates = vec![
        candidate("doc1", Some(vec![1.0, 0.0])),
        candidate("doc2", Some(vec![0.0, 1.0])),
        candidate("doc3", Some(vec![0.9, 0.1])),
        candidate("doc4", Some(vec![0.0, 0.0])),
    ];

    let ranked = rank_candidates(&[1.0, 0.0], candidates, 3);

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].movie.title, "doc1");
    assert!((ranked[0].score - 1.0).abs() < 1e-12);
    assert_eq!(ranked[1].movie.title, "doc3");
    assert!((ranked[1].score - 0.9938837346736189).abs() < 1e-6);
    // Tie at 0.0 keeps original retrieval order: doc2 before doc4.
    assert_eq!(ranked[2].movie.title, "doc2");
    assert_eq!(ranked[2].score, 0.0);
}

#[test]
fn test_rank_candidates_sorted_non_increasing() {
    let candidates = vec![
        candidate("a", Some(vec![0.1, 0.9])),
        candidate("b", Some(vec![1.0, 0.0])),
        candidate("c", Some(vec![0.5, 0.5])),
        candidate("d", Some(vec![-1.0, 0.0])),
    ];

    let ranked = rank_candidates(&[1.0, 0.0], candidates, 10);

    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_rank_candidates_drops_missing_embeddings() {
    let candidates = vec![
        candidate("scored", Some(vec![1.0, 0.0])),
        candidate("unscored", None),
    ];

    let ranked = rank_candidates(&[1.0, 0.0], candidates, 10);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].movie.title, "scored");
}

#[test]
fn test_rank_candidates_ties_keep_retrieval_order() {
    let candidates = vec![
        candidate("first", Some(vec![0.0, 1.0])),
        candidate("second", Some(vec![0.0, -1.0])),
        candidate("third", Some(vec![0.0, 0.0])),
    ];

    let ranked = rank_candidates(&[1.0, 0.0], candidates, 10);

    let zero_scored: Vec<&str> = ranked
        .iter()
        .filter(|hit| hit.score == 0.0)
        .map(|hit| hit.movie.title.as_str())
        .collect();
    assert_eq!(zero_scored, vec!["first", "second", "third"]);
}

#[test]
fn test_rank_candidates_truncates_to_limit() {
    let candidates = (0..10)
        .map(|i| candidate(&format!("movie-{i}"), Some(vec![1.0, i as f32 / 10.0])))
        .collect();

    let ranked = rank_candidates(&[1.0, 0.0], candidates, 3);
    assert_eq!(ranked.len(), 3);
}

#[tokio::test]
async fn test_fallback_empty_catalog_outcome() {
    let store = Arc::new(MockMovieStore::new());
    let fallback = FallbackSearch::new(store, 1000);

    let outcome = fallback.search(&[1.0, 0.0], 5).await.unwrap();
    assert_eq!(outcome, FallbackOutcome::EmptyCatalog);
}

#[tokio::test]
async fn test_fallback_no_embeddings_outcome() {
    let store = Arc::new(MockMovieStore::with_movies(vec![
        movie("a", None),
        movie("b", None),
    ]));
    let fallback = FallbackSearch::new(store, 1000);

    let outcome = fallback.search(&[1.0, 0.0], 5).await.unwrap();
    assert_eq!(outcome, FallbackOutcome::NoEmbeddings);
}

#[tokio::test]
async fn test_fallback_ranks_scanned_documents() {
    let store = Arc::new(MockMovieStore::with_movies(vec![
        movie("far", Some(vec![0.0, 1.0])),
        movie("near", Some(vec![1.0, 0.0])),
        movie("unscored", None),
    ]));
    let fallback = FallbackSearch::new(store, 1000);

    let outcome = fallback.search(&[1.0, 0.0], 2).await.unwrap();
    let FallbackOutcome::Ranked(hits) = outcome else {
        panic!("expected ranked outcome");
    };

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].movie.title, "near");
    assert_eq!(hits[1].movie.title, "far");
}

#[tokio::test]
async fn test_fallback_error_propagates() {
    let store = Arc::new(MockMovieStore::new());
    store.set_fail_scan(true);
    let fallback = FallbackSearch::new(store, 1000);

    assert!(fallback.search(&[1.0, 0.0], 5).await.is_err());
}

#[tokio::test]
async fn test_primary_zero_limit_short_circuits() {
    let store = Arc::new(MockMovieStore::with_movies(vec![movie(
        "only",
        Some(vec![1.0, 0.0]),
    )]));
    let primary = PrimarySearch::new(Arc::clone(&store), 10);

    assert!(primary.search(&[1.0, 0.0], 0).await.unwrap().is_empty());
    assert_eq!(store.search_calls(), 0);

    let hits = primary.search(&[1.0, 0.0], 5).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(store.search_calls(), 1);
}
