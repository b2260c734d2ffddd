//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// Module name ("nbadle-gs")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Day of the cached answer, if one has been selected (never the answer itself)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_date: Option<String>,
}

/// GET /health
///
/// Does not trigger a daily selection.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let selection_date = state.selector.peek().await.map(|s| s.date.clone());

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "nbadle-gs".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        selection_date,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
