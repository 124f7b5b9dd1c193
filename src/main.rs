//! ctabled - HTTP introspection daemon for a bounded MRU record table
//!
//! Serves lookups, refreshes, recency walks and statistics over one table.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ctable::api::create_router;
use ctable::{spawn_stats_reporter, AppState, Config};

/// Main entry point for the table daemon.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the record table with the configured limit
/// 4. Start the statistics reporter (unless disabled)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ctable=info,ctabled=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ctable daemon");

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        "Configuration loaded: limit={} (effective {}), min_limit={}, port={}, stats_interval={}s",
        config.limit,
        config.effective_limit(),
        config.min_limit,
        config.server_port,
        config.stats_interval
    );

    let state = AppState::from_config(&config);
    info!("Record table initialized");

    let reporter = (config.stats_interval > 0)
        .then(|| spawn_stats_reporter(state.table.clone(), config.stats_interval));
    if reporter.is_some() {
        info!("Statistics reporter started");
    }

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reporter))
        .await
        .context("server error")?;

    {
        let table = state.table.read().await;
        info!(
            entries = table.len(),
            constructed = table.lifecycle().constructed(),
            "Server shutdown complete"
        );
    }

    // Last handle: dropping it releases every live record
    drop(state);
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the statistics reporter and allows graceful shutdown.
async fn shutdown_signal(reporter: Option<tokio::task::JoinHandle<()>>) {
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

    if let Some(handle) = reporter {
        handle.abort();
        warn!("Statistics reporter aborted");
    }
}
