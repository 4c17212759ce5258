//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CINE_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_OVERSAMPLE_FACTOR, DEFAULT_RESULT_TTL_SECS, DEFAULT_SCAN_CAP,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CINE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Movie collection name. Default: `movies`.
    pub collection: String,

    /// Whether the result cache is enabled. Default: `true`.
    pub cache_enabled: bool,

    /// Max entries in the in-memory result cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// TTL for cached result sets, in seconds. Default: `86_400`.
    pub result_ttl_secs: u64,

    /// Document ceiling for the scan fallback. Default: `1_000`.
    pub scan_cap: u32,

    /// Candidate oversampling multiplier for the index tier. Default: `10`.
    pub oversample_factor: u64,

    /// Run the embedder in stub mode (no model download). Default: `false`.
    pub embed_stub: bool,

    /// Directory the embedding model files are cached in.
    pub embed_cache_dir: Option<PathBuf>,

    /// Budget for each cache round trip, in milliseconds. Default: `250`.
    pub cache_timeout_ms: u64,

    /// Budget for query embedding, in milliseconds. Default: `10_000`.
    pub embed_timeout_ms: u64,

    /// Budget for the vector index query, in milliseconds. Default: `2_000`.
    pub index_timeout_ms: u64,

    /// Budget for the fallback scan, in milliseconds. Default: `5_000`.
    pub scan_timeout_ms: u64,
}

/// Default Qdrant URL used when `CINE_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            cache_enabled: true,
            cache_capacity: 10_000,
            result_ttl_secs: DEFAULT_RESULT_TTL_SECS,
            scan_cap: DEFAULT_SCAN_CAP,
            oversample_factor: DEFAULT_OVERSAMPLE_FACTOR,
            embed_stub: false,
            embed_cache_dir: None,
            cache_timeout_ms: 250,
            embed_timeout_ms: 10_000,
            index_timeout_ms: 2_000,
            scan_timeout_ms: 5_000,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "CINE_PORT";
    const ENV_BIND_ADDR: &'static str = "CINE_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "CINE_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "CINE_COLLECTION";
    const ENV_CACHE_ENABLED: &'static str = "CINE_CACHE_ENABLED";
    const ENV_CACHE_CAPACITY: &'static str = "CINE_CACHE_CAPACITY";
    const ENV_RESULT_TTL_SECS: &'static str = "CINE_RESULT_TTL_SECS";
    const ENV_SCAN_CAP: &'static str = "CINE_SCAN_CAP";
    const ENV_OVERSAMPLE_FACTOR: &'static str = "CINE_OVERSAMPLE_FACTOR";
    const ENV_EMBED_STUB: &'static str = "CINE_EMBED_STUB";
    const ENV_EMBED_CACHE_DIR: &'static str = "CINE_EMBED_CACHE_DIR";
    const ENV_CACHE_TIMEOUT_MS: &'static str = "CINE_CACHE_TIMEOUT_MS";
    const ENV_EMBED_TIMEOUT_MS: &'static str = "CINE_EMBED_TIMEOUT_MS";
    const ENV_INDEX_TIMEOUT_MS: &'static str = "CINE_INDEX_TIMEOUT_MS";
    const ENV_SCAN_TIMEOUT_MS: &'static str = "CINE_SCAN_TIMEOUT_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let cache_enabled =
            Self::parse_bool_from_env(Self::ENV_CACHE_ENABLED, defaults.cache_enabled);
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let result_ttl_secs =
            Self::parse_u64_from_env(Self::ENV_RESULT_TTL_SECS, defaults.result_ttl_secs);
        let scan_cap = Self::parse_u64_from_env(Self::ENV_SCAN_CAP, defaults.scan_cap as u64) as u32;
        let oversample_factor =
            Self::parse_u64_from_env(Self::ENV_OVERSAMPLE_FACTOR, defaults.oversample_factor);
        let embed_stub = Self::parse_bool_from_env(Self::ENV_EMBED_STUB, defaults.embed_stub);
        let embed_cache_dir = Self::parse_optional_path_from_env(Self::ENV_EMBED_CACHE_DIR);
        let cache_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_CACHE_TIMEOUT_MS, defaults.cache_timeout_ms);
        let embed_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_EMBED_TIMEOUT_MS, defaults.embed_timeout_ms);
        let index_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_INDEX_TIMEOUT_MS, defaults.index_timeout_ms);
        let scan_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_SCAN_TIMEOUT_MS, defaults.scan_timeout_ms);

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            collection,
            cache_enabled,
            cache_capacity,
            result_ttl_secs,
            scan_cap,
            oversample_factor,
            embed_stub,
            embed_cache_dir,
            cache_timeout_ms,
            embed_timeout_ms,
            index_timeout_ms,
            scan_timeout_ms,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.embed_cache_dir {
            if path.exists() && !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(default)
    }
}
