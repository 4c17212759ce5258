use std::sync::Arc;

use super::model::{Identity, Movie, NewMovie, Role};
use super::service::{CatalogError, CatalogService};
use crate::cache::{MemoryBackend, SearchCache};
use crate::embedding::{EmbedderConfig, QueryEmbedder};
use crate::store::MockMovieStore;
use uuid::Uuid;

fn admin() -> Identity {
    Identity::new("alice", Role::Admin)
}

fn viewer() -> Identity {
    Identity::new("bob", Role::User)
}

fn new_movie(title: &str) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: 2014,
        director: "Christopher Nolan".to_string(),
        genres: vec!["sci-fi".to_string()],
        description: "A crew travels through a wormhole".to_string(),
        cast: vec!["Matthew McConaughey".to_string()],
        poster_url: None,
    }
}

fn service() -> (
    Arc<MockMovieStore>,
    SearchCache<MemoryBackend>,
    CatalogService<MockMovieStore, MemoryBackend>,
) {
    let store = Arc::new(MockMovieStore::new());
    let embedder = Arc::new(QueryEmbedder::load(EmbedderConfig::stub()).unwrap());
    let cache = SearchCache::new(MemoryBackend::new());
    let service = CatalogService::new(Arc::clone(&store), embedder, Some(cache.clone()));
    (store, cache, service)
}

#[test]
fn test_embedding_text_composition() {
    let movie = Movie {
        id: Uuid::new_v4(),
        title: "Heat".to_string(),
        year: 1995,
        director: "Michael Mann".to_string(),
        genres: vec!["crime".to_string(), "thriller".to_string()],
        description: "A detective hunts a master thief".to_string(),
        cast: Vec::new(),
        poster_url: None,
        rating: None,
        embedding: None,
    };

    assert_eq!(
        movie.embedding_text(),
        "Heat Michael Mann crime thriller A detective hunts a master thief"
    );
}

#[test]
fn test_summary_has_no_embedding_key() {
    let movie = Movie {
        id: Uuid::new_v4(),
        title: "Heat".to_string(),
        year: 1995,
        director: "Michael Mann".to_string(),
        genres: Vec::new(),
        description: String::new(),
        cast: Vec::new(),
        poster_url: None,
        rating: None,
        embedding: Some(vec![0.1, 0.2]),
    };

    let value = serde_json::to_value(movie.summary()).unwrap();
    assert!(value.get("embedding").is_none());
}

#[tokio::test]
async fn test_add_movie_requires_admin() {
    let (store, _cache, service) = service();

    let err = service
        .add_movie(&viewer(), new_movie("Interstellar"))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Forbidden { role: Role::User }));
    assert_eq!(store.movie_count(), 0);
}

#[tokio::test]
async fn test_add_movie_embeds_and_stores() {
    let (store, _cache, service) = service();

    let summary = service
        .add_movie(&admin(), new_movie("Interstellar"))
        .await
        .unwrap();

    assert_eq!(summary.title, "Interstellar");
    assert_eq!(store.movie_count(), 1);

    // The stored document carries a vector the search tiers can score.
    let candidates = crate::store::DocumentStore::scan(&*store, 10).await.unwrap();
    assert!(candidates[0].embedding.is_some());
}

#[tokio::test]
async fn test_add_movie_bumps_generation() {
    let (_store, cache, service) = service();

    assert_eq!(cache.generation().await, Some(0));
    service
        .add_movie(&admin(), new_movie("Interstellar"))
        .await
        .unwrap();
    assert_eq!(cache.generation().await, Some(1));
}

#[tokio::test]
async fn test_delete_movie_requires_admin_and_bumps() {
    let (store, cache, service) = service();
    let summary = service
        .add_movie(&admin(), new_movie("Interstellar"))
        .await
        .unwrap();

    assert!(
        service
            .delete_movie(&viewer(), summary.id)
            .await
            .is_err()
    );
    assert_eq!(store.movie_count(), 1);

    service.delete_movie(&admin(), summary.id).await.unwrap();
    assert_eq!(store.movie_count(), 0);
    assert_eq!(cache.generation().await, Some(2));
}
