//! Scriptable attribute provider

use async_trait::async_trait;
use nbadle_common::models::PlayerId;
use nbadle_gs::services::stats_client::fields;
use nbadle_gs::services::{AttributeProvider, AttributeRow, ProviderError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Serves rows from a table; can be switched offline
#[derive(Default)]
pub struct FakeProvider {
    rows: Mutex<HashMap<PlayerId, AttributeRow>>,
    offline: AtomicBool,
    calls: AtomicU32,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        let provider = Self::default();
        provider.set_offline(true);
        provider
    }

    pub fn with_row(self, player_id: PlayerId, row: AttributeRow) -> Self {
        self.rows.lock().unwrap().insert(player_id, row);
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttributeProvider for FakeProvider {
    fn source_id(&self) -> &'static str {
        "fake"
    }

    async fn fetch_attributes(
        &self,
        player_id: PlayerId,
        _timeout: Duration,
    ) -> Result<AttributeRow, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ProviderError::Timeout("provider offline".to_string()));
        }
        self.rows
            .lock()
            .unwrap()
            .get(&player_id)
            .cloned()
            .ok_or(ProviderError::EmptyResult(player_id))
    }
}

pub fn luka_row() -> AttributeRow {
    AttributeRow::new()
        .with(fields::DISPLAY_NAME, "Luka Dončić")
        .with(fields::TEAM_CITY, "Dallas")
        .with(fields::TEAM_NAME, "Mavericks")
        .with(fields::POSITION, "Guard-Forward")
        .with(fields::JERSEY, "77")
}

pub fn curry_row() -> AttributeRow {
    AttributeRow::new()
        .with(fields::DISPLAY_NAME, "Stephen Curry")
        .with(fields::TEAM_CITY, "Golden State")
        .with(fields::TEAM_NAME, "Warriors")
        .with(fields::POSITION, "Guard")
        .with(fields::JERSEY, "30")
}
