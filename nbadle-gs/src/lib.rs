//! nbadle-gs library interface
//!
//! Exposes the game services and router for the binary and integration tests.

pub mod api;
pub mod error;
pub mod roster;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use nbadle_common::time::Clock;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::roster::PlayerRoster;
use crate::services::{AttributeFetcher, AttributeProvider, DailySelector, GuessEvaluator, RetryPolicy};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Reference roster (read-only)
    pub roster: Arc<PlayerRoster>,
    /// Owner of today's answer
    pub selector: Arc<DailySelector>,
    pub evaluator: Arc<GuessEvaluator>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Wire the roster, provider and clock into the game services
    pub fn new(
        roster: Arc<PlayerRoster>,
        provider: Arc<dyn AttributeProvider>,
        policy: RetryPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let fetcher = Arc::new(AttributeFetcher::new(provider, policy));
        let selector = Arc::new(DailySelector::new(
            Arc::clone(&roster),
            Arc::clone(&fetcher),
            clock,
        ));
        let evaluator = Arc::new(GuessEvaluator::new(
            Arc::clone(&selector),
            Arc::clone(&roster),
            fetcher,
        ));

        Self {
            roster,
            selector,
            evaluator,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::game_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
