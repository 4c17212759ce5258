use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheBackend, SearchCache};
use crate::catalog::{MovieFilter, MovieSummary, ScoredMovie};
use crate::constants::{
    DEFAULT_OVERSAMPLE_FACTOR, DEFAULT_RESULT_TTL_SECS, DEFAULT_SCAN_CAP,
};
use crate::embedding::{EmbeddingError, QueryEmbedder};
use crate::hashing::{fingerprint, normalize_query};
use crate::retrieval::{FallbackOutcome, FallbackSearch, PrimarySearch};
use crate::store::DocumentStore;

use super::error::SearchError;
use super::types::{SearchOutcome, SearchSource};

/// Orchestrator tuning knobs. Each external call gets its own timeout.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// TTL for cached result sets.
    pub result_ttl: Duration,
    /// Candidate oversampling multiplier for the index tier.
    pub oversample_factor: u64,
    /// Document ceiling for the scan fallback.
    pub scan_cap: u32,
    /// Budget for each cache round trip.
    pub cache_timeout: Duration,
    /// Budget for query embedding.
    pub embed_timeout: Duration,
    /// Budget for the vector index query.
    pub index_timeout: Duration,
    /// Budget for the fallback scan.
    pub scan_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_ttl: Duration::from_secs(DEFAULT_RESULT_TTL_SECS),
            oversample_factor: DEFAULT_OVERSAMPLE_FACTOR,
            scan_cap: DEFAULT_SCAN_CAP,
            cache_timeout: Duration::from_millis(250),
            embed_timeout: Duration::from_secs(10),
            index_timeout: Duration::from_secs(2),
            scan_timeout: Duration::from_secs(5),
        }
    }
}

/// Semantic search façade: cache, then index, then in-memory scan.
pub struct SearchEngine<S: DocumentStore, B: CacheBackend> {
    embedder: Arc<QueryEmbedder>,
    store: Arc<S>,
    primary: PrimarySearch<S>,
    fallback: FallbackSearch<S>,
    cache: Option<SearchCache<B>>,
    config: SearchConfig,
}

impl<S: DocumentStore, B: CacheBackend> std::fmt::Debug for SearchEngine<S, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("embedder", &self.embedder)
            .field("cache_enabled", &self.cache.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore, B: CacheBackend> SearchEngine<S, B> {
    pub fn new(
        embedder: Arc<QueryEmbedder>,
        store: Arc<S>,
        cache: Option<SearchCache<B>>,
        config: SearchConfig,
    ) -> Self {
        let primary = PrimarySearch::new(Arc::clone(&store), config.oversample_factor);
        let fallback = FallbackSearch::new(Arc::clone(&store), config.scan_cap);
        Self {
            embedder,
            store,
            primary,
            fallback,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn embedder(&self) -> &QueryEmbedder {
        &self.embedder
    }

    /// Runs a semantic search.
    ///
    /// Per-call state machine: cache hit returns immediately; on a miss the
    /// index tier runs, and any index fault falls through to the scan
    /// fallback. The result is written back once, under the fingerprint
    /// computed from the generation observed at the start of the call; a
    /// bump that lands mid-call leaves this entry unaddressable, bounded by
    /// TTL.
    #[instrument(skip(self, query), fields(query_len = query.len(), limit = limit))]
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome, SearchError> {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            debug!("blank query, skipping retrieval");
            return Ok(SearchOutcome::NoQuery);
        }

        let fingerprint = self.observe_fingerprint(&normalized, limit).await;

        if let (Some(cache), Some(key)) = (&self.cache, fingerprint.as_deref()) {
            match timeout(self.config.cache_timeout, cache.get(key)).await {
                Ok(Some(hits)) => {
                    info!(hits = hits.len(), "cache hit");
                    return Ok(SearchOutcome::Ranked {
                        hits,
                        source: SearchSource::Cache,
                    });
                }
                Ok(None) => debug!("cache miss"),
                Err(_) => warn!("cache read timed out, treating as miss"),
            }
        }

        let Some(query_vector) = self.embed_query(&normalized).await? else {
            return Ok(SearchOutcome::NoQuery);
        };

        let (hits, source) =
            match timeout(self.config.index_timeout, self.primary.search(&query_vector, limit))
                .await
            {
                Ok(Ok(hits)) => {
                    debug!(hits = hits.len(), "vector index query succeeded");
                    (hits, SearchSource::Index)
                }
                Ok(Err(e)) => {
                    warn!(error = %e, limit, "vector index unavailable, falling back to scan");
                    self.run_fallback(&query_vector, limit).await?
                }
                Err(_) => {
                    warn!(limit, "vector index query timed out, falling back to scan");
                    self.run_fallback(&query_vector, limit).await?
                }
            };

        // Single write, only after the result is fully computed; a cancelled
        // call never leaves a partial entry behind.
        if let (Some(cache), Some(key)) = (&self.cache, fingerprint.as_deref()) {
            if timeout(
                self.config.cache_timeout,
                cache.put(key, &hits, self.config.result_ttl),
            )
            .await
            .is_err()
            {
                warn!("cache write timed out");
            }
        }

        info!(hits = hits.len(), source = %source, "search complete");
        Ok(SearchOutcome::Ranked { hits, source })
    }

    /// Exact/filtered lookup; shares the projection contract with semantic
    /// search but skips ranking and caching entirely.
    #[instrument(skip(self, filter), fields(limit = limit))]
    pub async fn filtered(
        &self,
        filter: &MovieFilter,
        limit: u32,
    ) -> Result<Vec<MovieSummary>, SearchError> {
        Ok(self.store.filter_scan(filter, limit).await?)
    }

    /// Reads the generation and derives the cache key for this call.
    ///
    /// `None` disables caching for the call (cache absent, unreachable, or
    /// timed out).
    async fn observe_fingerprint(&self, normalized: &str, limit: usize) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match timeout(self.config.cache_timeout, cache.generation()).await {
            Ok(Some(generation)) => Some(fingerprint(generation, normalized, limit)),
            Ok(None) => None,
            Err(_) => {
                warn!("cache generation read timed out, proceeding without cache");
                None
            }
        }
    }

    async fn embed_query(&self, text: &str) -> Result<Option<Vec<f32>>, SearchError> {
        let embedder = Arc::clone(&self.embedder);
        let text = text.to_string();
        let budget = self.config.embed_timeout;

        match timeout(budget, tokio::task::spawn_blocking(move || embedder.embed(&text))).await {
            Ok(Ok(result)) => Ok(result?),
            Ok(Err(join_error)) => Err(SearchError::Embedding(EmbeddingError::InferenceFailed {
                reason: join_error.to_string(),
            })),
            Err(_) => Err(SearchError::Timeout {
                stage: "embed",
                timeout_ms: budget.as_millis() as u64,
            }),
        }
    }

    async fn run_fallback(
        &self,
        query_vector: &[f32],
        limit: usize,
    ) -> Result<(Vec<ScoredMovie>, SearchSource), SearchError> {
        match timeout(
            self.config.scan_timeout,
            self.fallback.search(query_vector, limit),
        )
        .await
        {
            Ok(Ok(FallbackOutcome::Ranked(hits))) => Ok((hits, SearchSource::Scan)),
            Ok(Ok(FallbackOutcome::EmptyCatalog)) => {
                info!("scan fallback found an empty catalog");
                Ok((Vec::new(), SearchSource::Scan))
            }
            Ok(Ok(FallbackOutcome::NoEmbeddings)) => {
                warn!("scanned documents carry no embeddings, returning empty result");
                Ok((Vec::new(), SearchSource::Scan))
            }
            Ok(Err(e)) => Err(SearchError::Retrieval(e)),
            Err(_) => Err(SearchError::Timeout {
                stage: "scan",
                timeout_ms: self.config.scan_timeout.as_millis() as u64,
            }),
        }
    }
}
