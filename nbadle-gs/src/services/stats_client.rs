//! Stats service client (attribute provider)
//!
//! Looks up a player's current team, position and jersey from the
//! `commonplayerinfo` endpoint. The endpoint answers with column-oriented
//! result sets (`headers` + `rowSet`) which are flattened into an
//! [`AttributeRow`] keyed by column name.
//!
//! The service is slow and drops requests without browser-like headers, so
//! callers go through [`crate::services::AttributeFetcher`] rather than using
//! this client directly.

use async_trait::async_trait;
use nbadle_common::config::StatsApiConfig;
use nbadle_common::models::PlayerId;
use serde_json::Value;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const REFERER: &str = "https://www.nba.com/";
const RESULT_SET_NAME: &str = "CommonPlayerInfo";

/// Column names read from a player info row
pub mod fields {
    pub const TEAM_CITY: &str = "TEAM_CITY";
    pub const TEAM_NAME: &str = "TEAM_NAME";
    pub const POSITION: &str = "POSITION";
    pub const JERSEY: &str = "JERSEY";
    pub const DISPLAY_NAME: &str = "DISPLAY_FIRST_LAST";
}

/// Attribute provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No player info returned for {0}")]
    EmptyResult(PlayerId),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ProviderError {
    /// Timeout-class failures get the longer retry delay
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Named attribute values for one player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRow {
    values: HashMap<String, String>,
}

impl AttributeRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Zip a header list with one data row
    ///
    /// Strings are taken verbatim, numbers and booleans are rendered as text,
    /// nulls become empty strings.
    pub fn from_columns(headers: &[String], values: &[Value]) -> Self {
        let values = headers
            .iter()
            .zip(values)
            .map(|(name, value)| (name.clone(), value_to_text(value)))
            .collect();
        Self { values }
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Source of authoritative player attributes
#[async_trait]
pub trait AttributeProvider: Send + Sync {
    /// Provider identifier for logs
    fn source_id(&self) -> &'static str;

    /// Fetch the attribute row for one player
    ///
    /// `timeout` bounds a single request; retries are the caller's concern.
    async fn fetch_attributes(
        &self,
        player_id: PlayerId,
        timeout: Duration,
    ) -> Result<AttributeRow, ProviderError>;
}

/// HTTP client for the stats service
pub struct StatsApiClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl StatsApiClient {
    pub fn new(config: &StatsApiConfig) -> Result<Self, ProviderError> {
        let per_second = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
            ProviderError::Config("requests_per_second must be non-zero".to_string())
        })?;
        let rate_limiter = governor::RateLimiter::direct(governor::Quota::per_second(per_second));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }
}

#[async_trait]
impl AttributeProvider for StatsApiClient {
    fn source_id(&self) -> &'static str {
        "stats.nba.com"
    }

    async fn fetch_attributes(
        &self,
        player_id: PlayerId,
        timeout: Duration,
    ) -> Result<AttributeRow, ProviderError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/commonplayerinfo", self.base_url);
        debug!(player_id, url = %url, "Querying stats service");

        let response = self
            .client
            .get(&url)
            .query(&[("PlayerID", player_id.to_string()), ("LeagueID", "00".to_string())])
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::REFERER, REFERER)
            .header("x-nba-stats-origin", "stats")
            .header("x-nba-stats-token", "true")
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(status.as_u16(), error_text));
        }

        let body: Value = response.json().await?;
        parse_player_info(&body, player_id)
    }
}

/// Extract the first row of the player info result set
pub fn parse_player_info(body: &Value, player_id: PlayerId) -> Result<AttributeRow, ProviderError> {
    let result_sets = body
        .get("resultSets")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Parse("missing resultSets".to_string()))?;

    let result_set = result_sets
        .iter()
        .find(|set| set.get("name").and_then(Value::as_str) == Some(RESULT_SET_NAME))
        .or_else(|| result_sets.first())
        .ok_or(ProviderError::EmptyResult(player_id))?;

    let headers: Vec<String> = result_set
        .get("headers")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Parse("missing headers".to_string()))?
        .iter()
        .map(|h| h.as_str().map(str::to_string))
        .collect::<Option<_>>()
        .ok_or_else(|| ProviderError::Parse("non-string header".to_string()))?;

    let row = result_set
        .get("rowSet")
        .and_then(Value::as_array)
        .and_then(|rows| rows.first())
        .and_then(Value::as_array)
        .ok_or(ProviderError::EmptyResult(player_id))?;

    Ok(AttributeRow::from_columns(&headers, row))
}
