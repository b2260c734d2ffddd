//! Attribute fetcher with bounded retry and roster fallback
//!
//! **Algorithm:**
//! 1. Call the provider with the per-request timeout
//! 2. On success, return the row
//! 3. On failure, if attempts remain:
//!    a. timeout-class failure: wait `timeout_backoff`
//!    b. any other failure: wait `error_backoff`
//!    c. retry
//! 4. When attempts are exhausted, report `Unavailable`
//!
//! `Unavailable` is not an error. [`AttributeFetcher::resolve_clues`] turns it
//! (and rows missing a clue column) into roster-embedded fallback clues.

use nbadle_common::config::StatsApiConfig;
use nbadle_common::models::{ClueSet, ClueSource, PlayerId, PlayerRecord, ResolvedClues};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::stats_client::{fields, AttributeProvider, AttributeRow, ProviderError};

/// Retry settings for provider lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first (at least 1)
    pub max_attempts: u32,
    /// Delay after a timed-out attempt
    pub timeout_backoff: Duration,
    /// Delay after any other failed attempt
    pub error_backoff: Duration,
    /// Timeout for a single provider request
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&StatsApiConfig::default())
    }
}

impl From<&StatsApiConfig> for RetryPolicy {
    fn from(config: &StatsApiConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            timeout_backoff: Duration::from_millis(config.timeout_backoff_ms),
            error_backoff: Duration::from_millis(config.error_backoff_ms),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        }
    }
}

impl RetryPolicy {
    /// Delay to take after `err` before the next attempt
    pub fn backoff_for(&self, err: &ProviderError) -> Duration {
        if err.is_timeout() {
            self.timeout_backoff
        } else {
            self.error_backoff
        }
    }
}

/// Result of a bounded provider lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Enriched(AttributeRow),
    /// Every attempt failed
    Unavailable,
}

/// The provider answered but a clue column is absent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClueError {
    #[error("attribute row missing field {0}")]
    MissingField(&'static str),
}

/// Read the four clue columns from a provider row
pub fn clues_from_row(row: &AttributeRow) -> Result<ClueSet, ClueError> {
    let field = |name: &'static str| {
        row.get(name)
            .map(str::to_string)
            .ok_or(ClueError::MissingField(name))
    };

    Ok(ClueSet {
        team_city: field(fields::TEAM_CITY)?,
        team_name: field(fields::TEAM_NAME)?,
        position: field(fields::POSITION)?,
        jersey: field(fields::JERSEY)?,
    })
}

/// Provider wrapper applying a [`RetryPolicy`]
pub struct AttributeFetcher {
    provider: Arc<dyn AttributeProvider>,
    policy: RetryPolicy,
}

impl AttributeFetcher {
    pub fn new(provider: Arc<dyn AttributeProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    /// Look up one player, retrying per policy
    pub async fn fetch(&self, player_id: PlayerId) -> FetchOutcome {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self
                .provider
                .fetch_attributes(player_id, self.policy.request_timeout)
                .await
            {
                Ok(row) => {
                    if attempt > 1 {
                        debug!(player_id, attempt, "Provider lookup succeeded after retry");
                    }
                    return FetchOutcome::Enriched(row);
                }
                Err(err) => {
                    let backoff = self.policy.backoff_for(&err);
                    warn!(
                        player_id,
                        attempt,
                        max_attempts,
                        timeout = err.is_timeout(),
                        error = %err,
                        source = self.provider.source_id(),
                        "Provider lookup failed"
                    );

                    if attempt < max_attempts {
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        warn!(
            player_id,
            max_attempts,
            source = self.provider.source_id(),
            "Provider unavailable, retries exhausted"
        );
        FetchOutcome::Unavailable
    }

    /// Clues for a roster player: provider row if complete, roster fallback otherwise
    pub async fn resolve_clues(&self, player: &PlayerRecord) -> ResolvedClues {
        let row = match self.fetch(player.id).await {
            FetchOutcome::Enriched(row) => row,
            FetchOutcome::Unavailable => return fallback(player),
        };

        match clues_from_row(&row) {
            Ok(clues) => {
                if let Some(name) = row.get(fields::DISPLAY_NAME) {
                    if !name.eq_ignore_ascii_case(&player.full_name) {
                        debug!(
                            player_id = player.id,
                            roster_name = %player.full_name,
                            provider_name = %name,
                            "Provider display name differs from roster"
                        );
                    }
                }
                ResolvedClues {
                    clues,
                    source: ClueSource::Enriched,
                }
            }
            Err(err) => {
                warn!(player_id = player.id, error = %err, "Malformed attribute row, using roster clues");
                fallback(player)
            }
        }
    }
}

fn fallback(player: &PlayerRecord) -> ResolvedClues {
    ResolvedClues {
        clues: player.fallback.to_clues(),
        source: ClueSource::Fallback,
    }
}
