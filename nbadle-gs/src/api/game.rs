//! Game endpoints
//!
//! - `GET /api/daily-player`: today's clues
//! - `GET /api/players`: active players for the guess list
//! - `POST /api/check-guess`: evaluate one guess

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use nbadle_common::api::{GuessFeedback, GuessRequest, PlayerSummary};
use nbadle_common::models::ClueSet;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/daily-player
pub async fn daily_player(State(state): State<AppState>) -> ApiResult<Json<ClueSet>> {
    let selection = state.selector.todays_selection().await?;
    Ok(Json(selection.clues.clone()))
}

/// GET /api/players
pub async fn list_players(State(state): State<AppState>) -> Json<Vec<PlayerSummary>> {
    Json(state.roster.active_summaries())
}

/// POST /api/check-guess
pub async fn check_guess(
    State(state): State<AppState>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> ApiResult<Json<GuessFeedback>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let feedback = state.evaluator.evaluate(&request.guess).await?;
    Ok(Json(feedback))
}

/// Build game routes
pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/api/daily-player", get(daily_player))
        .route("/api/players", get(list_players))
        .route("/api/check-guess", post(check_guess))
}
