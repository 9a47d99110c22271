//! Hybrid Store - person CRUD server with a cache-aside layer
//!
//! Reads go through a TTL cache (Redis or in-process), writes go to the
//! SQLite person table and then invalidate the cache entry.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hybrid_store::api::create_router;
use hybrid_store::cache::{CacheBackend, MemoryCache, RedisCache};
use hybrid_store::db::SqlitePersonRepository;
use hybrid_store::{spawn_cleanup_task, AppState, CachedPersonStore, Config};

/// Main entry point for the person server.
///
/// # Startup Sequence
/// 1. Load `.env` if present, then initialize the tracing subscriber
/// 2. Load configuration from environment variables
/// 3. Open the person table and connect the cache backend
/// 4. Start the TTL cleanup task when the cache is in-process
/// 5. Serve HTTP until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hybrid_store=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hybrid Store person server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, database={}, cache_ttl={}s, backend_timeout={}ms",
        config.server_port, config.database_url, config.cache_ttl, config.backend_timeout_ms
    );

    let repo = SqlitePersonRepository::connect(&config.database_url)
        .await
        .context("failed to open person database")?;

    let (cache, cleanup_handle): (Arc<dyn CacheBackend>, Option<JoinHandle<()>>) =
        match &config.redis_url {
            Some(url) => {
                let redis = RedisCache::connect(url)
                    .await
                    .context("failed to connect to Redis")?;
                let cache: Arc<dyn CacheBackend> = Arc::new(redis);
                (cache, None)
            }
            None => {
                info!("REDIS_URL not set, using in-process cache");
                let memory = MemoryCache::new();
                let handle = spawn_cleanup_task(memory.clone(), config.cleanup_interval);
                let cache: Arc<dyn CacheBackend> = Arc::new(memory);
                (cache, Some(handle))
            }
        };

    let store = CachedPersonStore::new(Arc::new(repo), cache)
        .with_cache_ttl(config.cache_ttl())
        .with_backend_timeout(config.backend_timeout());
    let app = create_router(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
