//! Cache Guard - in-memory TTL cache and fixed-window rate limiter
//!
//! Runs the HTTP operations surface with both background sweeps.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_guard::api::{create_router, AppState};
use cache_guard::{spawn_cleanup_task, Config};

/// Main entry point for the Cache Guard server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and the rate limiter
/// 4. Start both background expiry sweeps
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_guard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cache Guard Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_size={}, default_ttl={}ms, default_profile={}, port={}, sweeps={}ms/{}ms",
        config.max_size,
        config.default_ttl_ms,
        config.default_profile,
        config.server_port,
        config.cache_sweep_interval_ms,
        config.limiter_sweep_interval_ms
    );
    if config.cache_sweep_interval_ms >= config.default_ttl_ms {
        warn!("Cache sweep interval is not below the default TTL; stale entries may linger");
    }

    let state = AppState::from_config(&config);
    info!("Cache and rate limiter initialized");

    let sweeps = vec![
        spawn_cleanup_task(
            state.cache.clone(),
            Duration::from_millis(config.cache_sweep_interval_ms),
        ),
        spawn_cleanup_task(
            state.limiter.clone(),
            Duration::from_millis(config.limiter_sweep_interval_ms),
        ),
        spawn_cleanup_task(
            state.request_limiter.clone(),
            Duration::from_millis(config.limiter_sweep_interval_ms),
        ),
    ];
    info!("Background sweep tasks started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(sweeps))
    .await
    .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the sweeps.
async fn shutdown_signal(sweeps: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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

    for handle in sweeps {
        handle.abort();
    }
    warn!("Sweep tasks aborted");
}
