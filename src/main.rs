//! Cinesearch HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use cinesearch::catalog::CatalogService;
use cinesearch::cache::{MemoryBackend, SearchCache};
use cinesearch::config::Config;
use cinesearch::embedding::{EmbedderConfig, QueryEmbedder};
use cinesearch::gateway::{HandlerState, create_router};
use cinesearch::search::{SearchConfig, SearchEngine};
use cinesearch::store::{DocumentStore, QdrantMovieStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        qdrant_url = %config.qdrant_url,
        collection = %config.collection,
        "Cinesearch starting"
    );

    let store = Arc::new(QdrantMovieStore::new(&config.qdrant_url, &config.collection)?);

    let embedder_config = if config.embed_stub {
        tracing::warn!("CINE_EMBED_STUB set, running embedder in stub mode");
        EmbedderConfig::stub()
    } else {
        match config.embed_cache_dir.clone() {
            Some(dir) => EmbedderConfig::default().with_cache_dir(dir),
            None => EmbedderConfig::default(),
        }
    };
    let embedder = Arc::new(QueryEmbedder::load(embedder_config)?);

    // Verifies an existing collection's vector size against the embedder; a
    // mismatched deployment fails startup here instead of at query time.
    store
        .ensure_collection(embedder.embedding_dim() as u64)
        .await?;

    let cache = config
        .cache_enabled
        .then(|| SearchCache::new(MemoryBackend::with_capacity(config.cache_capacity)));
    if cache.is_none() {
        tracing::warn!("result cache disabled, every search recomputes");
    }

    let search_config = SearchConfig {
        result_ttl: Duration::from_secs(config.result_ttl_secs),
        oversample_factor: config.oversample_factor,
        scan_cap: config.scan_cap,
        cache_timeout: Duration::from_millis(config.cache_timeout_ms),
        embed_timeout: Duration::from_millis(config.embed_timeout_ms),
        index_timeout: Duration::from_millis(config.index_timeout_ms),
        scan_timeout: Duration::from_millis(config.scan_timeout_ms),
    };

    let engine = Arc::new(SearchEngine::new(
        Arc::clone(&embedder),
        Arc::clone(&store),
        cache.clone(),
        search_config,
    ));
    let catalog = Arc::new(CatalogService::new(
        Arc::clone(&store),
        embedder,
        cache,
    ));

    let state = HandlerState::new(engine, catalog, store);
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Cinesearch shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("ctrl-c received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
