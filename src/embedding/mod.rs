//! Query embedding (model + stub backends).
//!
//! The model is loaded once per process and shared behind a mutex; individual
//! `embed` calls never re-initialize it.

/// Embedder configuration.
pub mod config;
mod error;


pub use config::EmbedderConfig;
pub use error::EmbeddingError;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::constants::validate_embedding_dim;

enum EmbedderBackend {
    Model { model: Mutex<TextEmbedding> },
    Stub,
}

/// Turns free text into a fixed-dimension vector (supports stub mode).
pub struct QueryEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for QueryEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { .. } => "Model",
                    EmbedderBackend::Stub => "Stub",
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl QueryEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("query embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let mut options = InitOptions::new(EmbeddingModel::ParaphraseMLMiniLML12V2)
            .with_show_download_progress(config.show_download_progress);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let model =
            TextEmbedding::try_new(options).map_err(|e| EmbeddingError::ModelInitFailed {
                reason: e.to_string(),
            })?;

        info!(
            embedding_dim = config.embedding_dim,
            "embedding model loaded (paraphrase-multilingual-MiniLM-L12-v2)"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model: Mutex::new(model),
            },
            config,
        })
    }

    /// Generates an embedding for a single string.
    ///
    /// Blank input returns `Ok(None)`; callers short-circuit instead of
    /// querying with a degenerate vector.
    pub fn embed(&self, text: &str) -> Result<Option<Vec<f32>>, EmbeddingError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let vector = match &self.backend {
            EmbedderBackend::Model { model } => {
                debug!(text_len = trimmed.len(), "generating embedding");
                let mut embeddings = model
                    .lock()
                    .embed(vec![trimmed.to_string()], None)
                    .map_err(|e| EmbeddingError::InferenceFailed {
                        reason: e.to_string(),
                    })?;
                if embeddings.is_empty() {
                    return Err(EmbeddingError::InferenceFailed {
                        reason: "model returned no embedding".to_string(),
                    });
                }
                embeddings.swap_remove(0)
            }
            EmbedderBackend::Stub => self.embed_stub(trimmed),
        };

        validate_embedding_dim(self.config.embedding_dim, vector.len()).map_err(|_| {
            EmbeddingError::DimensionMismatch {
                expected: self.config.embedding_dim,
                actual: vector.len(),
            }
        })?;

        Ok(Some(vector))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize(&mut embedding);
        embedding
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}

fn normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in embedding {
            *x /= norm;
        }
    }
}
