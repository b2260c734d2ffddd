//! Error types for nbadle-gs HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::SelectionError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Today's answer could not be selected (500)
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Selection(err) => match err {
                SelectionError::NoActivePlayers => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NO_ACTIVE_PLAYERS",
                    err.to_string(),
                ),
            },
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, %message, "Request failed");
        } else {
            tracing::warn!(code = error_code, %message, "Request rejected");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
