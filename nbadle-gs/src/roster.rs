//! Player roster (reference dataset)
//!
//! Loaded once at startup from the JSON file produced by the offline
//! ingestion job and never modified afterwards. Queryable by active flag and
//! by case-insensitive display name.

use nbadle_common::api::PlayerSummary;
use nbadle_common::models::{PlayerId, PlayerRecord};
use nbadle_common::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Normalize a display name for comparison
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable in-memory player catalog
#[derive(Debug, Clone, Default)]
pub struct PlayerRoster {
    players: Vec<PlayerRecord>,
    /// Normalized display name → index of first record with that name
    by_name: HashMap<String, usize>,
}

impl PlayerRoster {
    /// Build a roster from records
    ///
    /// When two records share a display name the first one wins. Duplicate
    /// identifiers are rejected.
    pub fn new(players: Vec<PlayerRecord>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(players.len());
        let mut seen_ids: HashSet<PlayerId> = HashSet::with_capacity(players.len());

        for (index, player) in players.iter().enumerate() {
            if !seen_ids.insert(player.id) {
                return Err(Error::InvalidInput(format!(
                    "duplicate player id {} in roster",
                    player.id
                )));
            }
            if let Entry::Vacant(slot) = by_name.entry(normalize_name(&player.full_name)) {
                slot.insert(index);
            }
        }

        Ok(Self { players, by_name })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let players: Vec<PlayerRecord> = serde_json::from_str(json)?;
        Self::new(players)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players flagged active (the pool the daily answer is drawn from)
    pub fn active(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|p| p.is_active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Exact, case-insensitive display-name lookup over all players
    pub fn find_by_name(&self, name: &str) -> Option<&PlayerRecord> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&index| &self.players[index])
    }

    /// Active players for the guess dropdown, sorted by display name
    pub fn active_summaries(&self) -> Vec<PlayerSummary> {
        let mut summaries: Vec<PlayerSummary> = self.active().map(PlayerSummary::from).collect();
        summaries.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        summaries
    }
}
