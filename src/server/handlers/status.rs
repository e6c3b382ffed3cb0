//! Banner, health and status handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::super::types::{AppState, FailureCounts, StatusResponse};

/// `GET /`
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": env!("CARGO_PKG_NAME") }))
}

/// `GET /health` and `HEAD /health`: 200 with an empty body, for uptime monitors
pub async fn health_handler() -> StatusCode {
    StatusCode::OK
}

/// JSON counters for all fetches served since startup
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let stats = state.stats();
    Json(StatusResponse {
        fetches: stats.fetches(),
        successes: stats.successes(),
        attempts: stats.attempts(),
        retries: stats.retries(),
        failures: FailureCounts::from_stats(stats),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
    })
}
