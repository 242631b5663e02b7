//! HTTP server initialization and runtime setup.
//!
//! Handles record store setup, cache warm-up, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::CsvPartnerRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Partner record store (and warms its cache)
/// - Axum HTTP server with graceful shutdown
///
/// A data file that cannot be read at startup is logged but not fatal: the
/// store retries on each request and pages show the error until it loads.
///
/// # Errors
///
/// Returns an error if:
/// - The configured delimiter is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let delimiter = config
        .delimiter()
        .context("DATA_DELIMITER must be a single ASCII character")?;
    let repository =
        Arc::new(CsvPartnerRepository::new(&config.data_file).with_delimiter(delimiter));

    let state = AppState::new(repository, config.map);

    match state.partner_service.table().await {
        Ok(table) => tracing::info!("Partner table ready ({} rows)", table.len()),
        Err(e) => tracing::error!("Partner table unavailable at startup: {}", e),
    }

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
