//! Domain models shared between the roster, selector and evaluator

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable player identifier (stats service person id)
pub type PlayerId = i64;

/// The four comparable attributes of a player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueSet {
    pub team_city: String,
    pub team_name: String,
    pub position: String,
    pub jersey: String,
}

/// Clue values embedded in the roster file
///
/// Used when the stats service cannot be reached. Every field is optional;
/// a missing field becomes an empty clue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackClues {
    #[serde(default, deserialize_with = "text_or_number")]
    pub team_city: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub jersey: Option<String>,
}

impl FallbackClues {
    pub fn to_clues(&self) -> ClueSet {
        ClueSet {
            team_city: self.team_city.clone().unwrap_or_default(),
            team_name: self.team_name.clone().unwrap_or_default(),
            position: self.position.clone().unwrap_or_default(),
            jersey: self.jersey.clone().unwrap_or_default(),
        }
    }
}

/// One entry of the reference roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub full_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub is_active: bool,
    #[serde(flatten)]
    pub fallback: FallbackClues,
}

/// Where a clue set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClueSource {
    /// Stats service returned a complete row
    Enriched,
    /// Roster-embedded values were used
    Fallback,
}

/// Clues for one player plus their provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClues {
    pub clues: ClueSet,
    pub source: ClueSource,
}

/// Today's answer
///
/// Replaced wholesale when the calendar day changes; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySelection {
    /// Calendar day key (`YYYY-MM-DD`)
    pub date: String,
    pub player_id: PlayerId,
    pub full_name: String,
    pub clues: ClueSet,
    pub source: ClueSource,
}

/// Accept a JSON string or number (jersey numbers appear as both), or null
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
