use uuid::Uuid;

use super::mock::MockMovieStore;
use super::client::DocumentStore;
use super::error::StoreError;
use crate::catalog::{Movie, MovieFilter};

fn movie(title: &str, year: i32, director: &str, genres: &[&str], embedding: Option<Vec<f32>>) -> Movie {
    Movie {
        id: Uuid::new_v4(),
        title: title.to_string(),
        year,
        director: director.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        description: format!("{title} description"),
        cast: Vec::new(),
        poster_url: None,
        rating: None,
        embedding,
    }
}

fn seeded_store() -> MockMovieStore {
    MockMovieStore::with_movies(vec![
        movie("Alien", 1979, "Ridley Scott", &["sci-fi", "horror"], Some(vec![1.0, 0.0])),
        movie("Heat", 1995, "Michael Mann", &["crime"], Some(vec![0.0, 1.0])),
        movie("Aliens", 1986, "James Cameron", &["sci-fi"], Some(vec![0.9, 0.1])),
        movie("Lost Tape", 2001, "Unknown", &["mystery"], None),
    ])
}

#[tokio::test]
async fn test_ann_search_ranks_by_similarity() {
    let store = seeded_store();

    let hits = store.ann_search(vec![1.0, 0.0], 10, 100).await.unwrap();

    assert_eq!(hits[0].movie.title, "Alien");
    assert_eq!(hits[1].movie.title, "Aliens");
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_ann_search_skips_movies_without_embeddings() {
    let store = seeded_store();

    let hits = store.ann_search(vec![1.0, 0.0], 10, 100).await.unwrap();

    assert!(hits.iter().all(|h| h.movie.title != "Lost Tape"));
}

#[tokio::test]
async fn test_ann_search_failure_toggle() {
    let store = seeded_store();
    store.set_fail_search(true);

    let err = store.ann_search(vec![1.0, 0.0], 5, 100).await.unwrap_err();
    assert!(matches!(err, StoreError::SearchFailed { .. }));
}

#[tokio::test]
async fn test_scan_respects_cap_and_keeps_missing_embeddings() {
    let store = seeded_store();

    let all = store.scan(100).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all.iter().filter(|c| c.embedding.is_none()).count(), 1);

    let capped = store.scan(2).await.unwrap();
    assert_eq!(capped.len(), 2);
}

#[tokio::test]
async fn test_filter_scan_by_fields() {
    let store = seeded_store();

    let by_title = store
        .filter_scan(
            &MovieFilter {
                title: Some("alien".to_string()),
                ..MovieFilter::default()
            },
            10,
        )
        .await
        .unwrap();
    assert_eq!(by_title.len(), 2);

    let by_year = store
        .filter_scan(
            &MovieFilter {
                year: Some(1995),
                ..MovieFilter::default()
            },
            10,
        )
        .await
        .unwrap();
    assert_eq!(by_year.len(), 1);
    assert_eq!(by_year[0].title, "Heat");

    let by_genre_and_director = store
        .filter_scan(
            &MovieFilter {
                genre: Some("sci-fi".to_string()),
                director: Some("cameron".to_string()),
                ..MovieFilter::default()
            },
            10,
        )
        .await
        .unwrap();
    assert_eq!(by_genre_and_director.len(), 1);
    assert_eq!(by_genre_and_director[0].title, "Aliens");
}

#[tokio::test]
async fn test_upsert_replaces_by_id() {
    let store = MockMovieStore::new();
    let mut original = movie("Solaris", 1972, "Andrei Tarkovsky", &["sci-fi"], Some(vec![1.0, 0.0]));
    store.upsert(vec![original.clone()]).await.unwrap();

    original.year = 2002;
    store.upsert(vec![original]).await.unwrap();

    assert_eq!(store.movie_count(), 1);
    let hits = store
        .filter_scan(
            &MovieFilter {
                year: Some(2002),
                ..MovieFilter::default()
            },
            10,
        )
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_ensure_collection_rejects_dimension_change() {
    let store = MockMovieStore::new();

    store.ensure_collection(384).await.unwrap();
    store.ensure_collection(384).await.unwrap();

    let err = store.ensure_collection(768).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidDimension {
            expected: 768,
            actual: 384
        }
    ));
}

#[tokio::test]
async fn test_delete_removes_movie() {
    let store = MockMovieStore::new();
    let target = movie("Heat", 1995, "Michael Mann", &["crime"], Some(vec![0.0, 1.0]));
    let id = target.id;
    store.upsert(vec![target]).await.unwrap();

    store.delete(vec![id]).await.unwrap();
    assert_eq!(store.movie_count(), 0);
}
