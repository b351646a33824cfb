//! Serve loop: logging, components, bind, graceful shutdown.

use anyhow::{Context, Result};
use shop_core::init_tracing;
use tracing::{info, instrument, warn};

use crate::components::build_components;
use crate::config::AppConfig;
use crate::routes::build_router;

/// Main entry: init logging and report config warnings, build components, serve until
/// Ctrl-C / SIGTERM, then release the graph connection.
#[instrument(skip(config))]
pub async fn run_server(config: AppConfig) -> Result<()> {
    init_tracing(&config.log_file, config.debug)?;
    for warning in &config.warnings {
        warn!("{warning}");
    }

    info!(
        graph_backend = ?config.graph.backend,
        model = %config.llm.model,
        "Initializing shopping assistant"
    );

    let state = build_components(&config).await;
    let agent = state.agent.clone();
    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutting down");
    agent.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
