use std::path::PathBuf;

use super::error::EmbeddingError;
use crate::constants::DEFAULT_EMBEDDING_DIM;

/// Query embedder configuration.
///
/// The model is paraphrase-multilingual-MiniLM-L12-v2 (384 dimensions); the
/// collection the documents live in must be created with the same vector
/// size. Use [`EmbedderConfig::stub`] for tests and offline runs.
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Output vector dimension.
    pub embedding_dim: usize,

    /// Directory the model files are cached in (downloaded on first use).
    pub cache_dir: Option<PathBuf>,

    /// Show a progress bar while downloading model files.
    pub show_download_progress: bool,

    /// Run a deterministic stub instead of the real model (testing only).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            cache_dir: None,
            show_download_progress: false,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    /// Stub configuration: hash-seeded deterministic vectors, no model files.
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = Some(dir);
        self
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
