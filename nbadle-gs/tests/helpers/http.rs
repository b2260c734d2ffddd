//! Router construction and request helpers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use nbadle_common::time::FixedClock;
use nbadle_gs::roster::PlayerRoster;
use nbadle_gs::services::{AttributeProvider, RetryPolicy};
use nbadle_gs::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Luka is the only active player, so he is always today's answer
pub const ROSTER_JSON: &str = r#"[
    {"id": 1629029, "full_name": "Luka Doncic", "first_name": "Luka", "last_name": "Doncic", "is_active": true,
     "team_city": "Dallas", "team_name": "Mavericks", "position": "Guard-Forward", "jersey": "77"},
    {"id": 201939, "full_name": "Stephen Curry", "first_name": "Stephen", "last_name": "Curry", "is_active": false,
     "team_city": "Golden State", "team_name": "Warriors", "position": "Guard", "jersey": "30"},
    {"id": 893, "full_name": "Michael Jordan", "first_name": "Michael", "last_name": "Jordan", "is_active": false,
     "team_city": "Chicago", "team_name": "Bulls", "position": "Guard", "jersey": "23"}
]"#;

/// Short delays so offline-provider tests stay fast
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        timeout_backoff: Duration::from_millis(2),
        error_backoff: Duration::from_millis(1),
        request_timeout: Duration::from_millis(100),
    }
}

pub fn test_state(
    roster_json: &str,
    provider: Arc<dyn AttributeProvider>,
    clock: Arc<FixedClock>,
) -> AppState {
    let roster = PlayerRoster::from_json_str(roster_json).unwrap();
    AppState::new(Arc::new(roster), provider, fast_policy(), clock)
}

/// Router over [`ROSTER_JSON`] on 2024-11-01
pub fn test_app(provider: Arc<dyn AttributeProvider>) -> (Router, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()));
    let state = test_state(ROSTER_JSON, provider, clock.clone());
    (build_router(state), clock)
}

async fn body_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    body_json(response).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    body_json(response).await
}
