use qdrant_client::Qdrant;
use qdrant_client::qdrant::vectors_config;
use qdrant_client::qdrant::vectors_output::VectorsOptions;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
    PointsIdsList, ScrollPointsBuilder, SearchParamsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use uuid::Uuid;

use super::error::StoreError;
use super::model::{payload_from_movie, summary_from_payload};
use crate::catalog::{Movie, MovieCandidate, MovieFilter, MovieSummary, ScoredMovie};

/// Async interface over the movie document store.
///
/// The two retrieval tiers map onto the two read methods: `ann_search` is the
/// vector index query (embedding projected out server-side), `scan` is the
/// bounded bulk load the in-memory fallback scores locally. Mutations exist
/// for the catalog service.
pub trait DocumentStore: Send + Sync {
    /// Returns `true` if the store answers a health probe.
    fn is_ready(&self) -> impl std::future::Future<Output = bool> + Send;

    /// Creates the movie collection if it doesn't exist.
    ///
    /// If the collection already exists, its configured vector size must
    /// match `vector_size`; a mismatch is a configuration error surfaced at
    /// startup, never a condition to recover from at query time.
    fn ensure_collection(
        &self,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Approximate-nearest-neighbor query over `candidates` candidates,
    /// capped at `limit` results. Never returns stored embeddings.
    fn ann_search(
        &self,
        query: Vec<f32>,
        limit: u64,
        candidates: u64,
    ) -> impl std::future::Future<Output = Result<Vec<ScoredMovie>, StoreError>> + Send;

    /// Bulk-loads up to `cap` documents with display fields and vectors.
    fn scan(
        &self,
        cap: u32,
    ) -> impl std::future::Future<Output = Result<Vec<MovieCandidate>, StoreError>> + Send;

    /// Exact/filtered lookup; no ranking, embeddings never returned.
    fn filter_scan(
        &self,
        filter: &MovieFilter,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<MovieSummary>, StoreError>> + Send;

    /// Upserts documents (vector + display payload).
    fn upsert(
        &self,
        movies: Vec<Movie>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Deletes documents by id.
    fn delete(
        &self,
        ids: Vec<Uuid>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Clone)]
/// Qdrant-backed movie store.
pub struct QdrantMovieStore {
    client: std::sync::Arc<Qdrant>,
    url: String,
    collection: String,
}

impl QdrantMovieStore {
    /// Creates a store client for `url` over `collection`.
    pub fn new(url: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| StoreError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client: std::sync::Arc::new(client),
            url: url.to_string(),
            collection: collection.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn filter_conditions(filter: &MovieFilter) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(title) = &filter.title {
            conditions.push(Condition::matches_text("title", title.clone()));
        }
        if let Some(director) = &filter.director {
            conditions.push(Condition::matches_text("director", director.clone()));
        }
        if let Some(genre) = &filter.genre {
            conditions.push(Condition::matches("genres", genre.clone()));
        }
        if let Some(year) = filter.year {
            conditions.push(Condition::matches("year", year as i64));
        }
        conditions
    }
}

impl DocumentStore for QdrantMovieStore {
    async fn is_ready(&self) -> bool {
        self.client.health_check().await.is_ok()
    }

    async fn ensure_collection(&self, vector_size: u64) -> Result<(), StoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| StoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if exists {
            // An existing collection must agree with the embedder on vector
            // size; catching a mismatched deployment here keeps it out of
            // the query path.
            let info = self
                .client
                .collection_info(&self.collection)
                .await
                .map_err(|e| StoreError::CreateCollectionFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

            let configured = info
                .result
                .and_then(|info| info.config)
                .and_then(|config| config.params)
                .and_then(|params| params.vectors_config)
                .and_then(|vectors| vectors.config)
                .and_then(|config| match config {
                    vectors_config::Config::Params(params) => Some(params.size),
                    vectors_config::Config::ParamsMap(_) => None,
                });

            if let Some(configured) = configured {
                if configured != vector_size {
                    return Err(StoreError::InvalidDimension {
                        expected: vector_size as usize,
                        actual: configured as usize,
                    });
                }
            }

            return Ok(());
        }

        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| StoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn ann_search(
        &self,
        query: Vec<f32>,
        limit: u64,
        candidates: u64,
    ) -> Result<Vec<ScoredMovie>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        // Oversample the candidate set to preserve recall; payload only, the
        // stored vectors stay server-side.
        let search_params = SearchParamsBuilder::default().hnsw_ef(candidates);

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query, limit)
                    .with_payload(true)
                    .params(search_params),
            )
            .await
            .map_err(|e| StoreError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let hits = response
            .result
            .into_iter()
            .filter_map(|point| {
                let movie = summary_from_payload(&point.payload)?;
                Some(ScoredMovie {
                    movie,
                    score: point.score as f64,
                })
            })
            .collect();

        Ok(hits)
    }

    async fn scan(&self, cap: u32) -> Result<Vec<MovieCandidate>, StoreError> {
        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .limit(cap)
                    .with_payload(true)
                    .with_vectors(true),
            )
            .await
            .map_err(|e| StoreError::ScanFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let candidates = response
            .result
            .into_iter()
            .filter_map(|point| {
                let summary = summary_from_payload(&point.payload)?;
                let embedding = point
                    .vectors
                    .and_then(|v| v.vectors_options)
                    .and_then(|options| match options {
                        VectorsOptions::Vector(vector) => Some(vector.data),
                        VectorsOptions::Vectors(_) => None,
                    });
                Some(MovieCandidate { summary, embedding })
            })
            .collect();

        Ok(candidates)
    }

    async fn filter_scan(
        &self,
        filter: &MovieFilter,
        limit: u32,
    ) -> Result<Vec<MovieSummary>, StoreError> {
        let mut builder = ScrollPointsBuilder::new(&self.collection)
            .limit(limit)
            .with_payload(true);

        let conditions = Self::filter_conditions(filter);
        if !conditions.is_empty() {
            builder = builder.filter(Filter::must(conditions));
        }

        let response =
            self.client
                .scroll(builder)
                .await
                .map_err(|e| StoreError::ScanFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| summary_from_payload(&point.payload))
            .collect())
    }

    async fn upsert(&self, movies: Vec<Movie>) -> Result<(), StoreError> {
        if movies.is_empty() {
            return Ok(());
        }

        let mut points = Vec::with_capacity(movies.len());
        for movie in movies {
            let vector = movie
                .embedding
                .clone()
                .ok_or(StoreError::MissingEmbedding { id: movie.id })?;
            let payload = payload_from_movie(&movie);
            points.push(PointStruct::new(movie.id.to_string(), vector, payload));
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| StoreError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn delete(&self, ids: Vec<Uuid>) -> Result<(), StoreError> {
        if ids.is_empty() {
            return Ok(());
        }

        let points_selector = PointsIdsList {
            ids: ids.into_iter().map(|id| id.to_string().into()).collect(),
        };

        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(points_selector)
                    .wait(true),
            )
            .await
            .map_err(|e| StoreError::DeleteFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}
