//! HTTP adapter exposing the fetcher.
//!
//! Provides four endpoints:
//! - `POST /fetch` - fetch a page, answer with the output record
//! - `GET /` - service banner
//! - `GET|HEAD /health` - liveness check
//! - `GET /status` - JSON fetch counters and uptime

mod handlers;
mod types;

use std::future::Future;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::error_handling::InitializationError;

use handlers::{fetch_handler, health_handler, root_handler, status_handler};
pub use types::{AppState, FailureCounts, FetchPayload, StatusResponse};

/// Builds the router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/fetch", post(fetch_handler))
        // GET routes also answer HEAD, with the body stripped
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), anyhow::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

/// Binds `bind:port` and serves until Ctrl-C.
///
/// A bind failure carries an [`InitializationError::ServerBindError`].
pub async fn start_server(bind: &str, port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind((bind, port))
        .await
        .map_err(InitializationError::ServerBindError)
        .with_context(|| format!("Failed to bind server to {}:{}", bind, port))?;

    let local = listener.local_addr()?;
    log::info!("Listening on http://{}/", local);
    log::info!("  - Fetch: POST http://{}/fetch", local);
    log::info!("  - Status: http://{}/status", local);

    serve(listener, state, shutdown_signal()).await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown requested, finishing in-flight requests"),
        Err(e) => {
            log::error!("Failed to listen for Ctrl-C, serving until killed: {e}");
            std::future::pending::<()>().await;
        }
    }
}
