//! Daily answer selection
//!
//! Single-slot cache keyed by calendar day. The first request of a day draws
//! a random active player, resolves its clues and stores the result; every
//! later request that day gets the stored value.
//!
//! Refreshes are single-flight: callers that find the slot stale queue on
//! `refresh` and re-check the slot once they hold it, so a day rollover
//! picks exactly one player and makes one provider lookup.

use nbadle_common::models::{DailySelection, PlayerRecord};
use nbadle_common::time::Clock;
use rand::seq::SliceRandom;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::attribute_fetcher::AttributeFetcher;
use crate::roster::PlayerRoster;

/// Selection failures (fatal for the request)
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("No active players in roster")]
    NoActivePlayers,
}

pub struct DailySelector {
    roster: Arc<PlayerRoster>,
    fetcher: Arc<AttributeFetcher>,
    clock: Arc<dyn Clock>,
    current: RwLock<Option<Arc<DailySelection>>>,
    refresh: Mutex<()>,
}

impl DailySelector {
    pub fn new(roster: Arc<PlayerRoster>, fetcher: Arc<AttributeFetcher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            roster,
            fetcher,
            clock,
            current: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Today's answer, selecting a new one if the day has changed
    pub async fn todays_selection(&self) -> Result<Arc<DailySelection>, SelectionError> {
        let today = self.clock.today_key();
        if let Some(selection) = self.cached_for(&today).await {
            return Ok(selection);
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited
        let today = self.clock.today_key();
        if let Some(selection) = self.cached_for(&today).await {
            return Ok(selection);
        }

        let selection = Arc::new(self.select_for(today).await?);
        *self.current.write().await = Some(Arc::clone(&selection));

        info!(
            date = %selection.date,
            player_id = selection.player_id,
            player = %selection.full_name,
            source = ?selection.source,
            "Daily player selected"
        );

        Ok(selection)
    }

    /// Cached selection without triggering a refresh (may be stale)
    pub async fn peek(&self) -> Option<Arc<DailySelection>> {
        self.current.read().await.clone()
    }

    async fn cached_for(&self, today: &str) -> Option<Arc<DailySelection>> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|selection| selection.date == today)
            .cloned()
    }

    async fn select_for(&self, date: String) -> Result<DailySelection, SelectionError> {
        let player = self.pick_active()?;
        let resolved = self.fetcher.resolve_clues(&player).await;

        Ok(DailySelection {
            date,
            player_id: player.id,
            full_name: player.full_name,
            clues: resolved.clues,
            source: resolved.source,
        })
    }

    fn pick_active(&self) -> Result<PlayerRecord, SelectionError> {
        let active: Vec<&PlayerRecord> = self.roster.active().collect();
        active
            .choose(&mut rand::thread_rng())
            .map(|player| (*player).clone())
            .ok_or(SelectionError::NoActivePlayers)
    }
}
