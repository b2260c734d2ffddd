//! Request/response bodies for the game endpoints
//!
//! # Examples
//!
//! ```
//! use nbadle_common::api::types::{ClueFeedback, JerseyHint};
//!
//! let feedback = ClueFeedback {
//!     team_match: false,
//!     position_match: true,
//!     jersey_match: false,
//!     jersey_hint: JerseyHint::Up,
//! };
//! let json = serde_json::to_value(&feedback).unwrap();
//! assert_eq!(json["jersey_hint"], "up");
//! ```

use serde::{Deserialize, Serialize, Serializer};

use crate::models::{ClueSet, PlayerId, PlayerRecord};

/// Message for a correct guess
pub const MSG_CORRECT: &str = "You got it!";
/// Message for a resolved but wrong guess
pub const MSG_TRY_AGAIN: &str = "Try again!";
/// Message for a guess that names no known player
pub const MSG_NOT_FOUND: &str = "Invalid player name. Please select from the list.";

/// POST /api/check-guess body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GuessRequest {
    /// Player display name as typed or picked by the user
    #[serde(default)]
    pub guess: String,
}

/// Entry of GET /api/players
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub full_name: String,
}

impl From<&PlayerRecord> for PlayerSummary {
    fn from(record: &PlayerRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name.clone(),
        }
    }
}

/// Direction of the correct jersey number relative to the guess
///
/// Serialized as `"up"`, `"down"` or `""`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum JerseyHint {
    /// Correct number is higher than the guess
    #[serde(rename = "up")]
    Up,
    /// Correct number is lower than the guess
    #[serde(rename = "down")]
    Down,
    /// Equal, or at least one side is not an integer
    #[default]
    #[serde(rename = "")]
    None,
}

/// Per-clue comparison of the guessed player against today's answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClueFeedback {
    pub team_match: bool,
    pub position_match: bool,
    pub jersey_match: bool,
    pub jersey_hint: JerseyHint,
}

impl ClueFeedback {
    /// Feedback for guessing the answer itself
    pub fn all_match() -> Self {
        Self {
            team_match: true,
            position_match: true,
            jersey_match: true,
            jersey_hint: JerseyHint::None,
        }
    }
}

/// POST /api/check-guess response
///
/// `feedback` serializes as `{}` when the guess could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessFeedback {
    pub correct: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guessed_player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guessed_player_clues: Option<ClueSet>,
    #[serde(serialize_with = "empty_object_when_none")]
    pub feedback: Option<ClueFeedback>,
}

impl GuessFeedback {
    pub fn correct(name: impl Into<String>, clues: ClueSet) -> Self {
        Self {
            correct: true,
            message: MSG_CORRECT.to_string(),
            guessed_player_name: Some(name.into()),
            guessed_player_clues: Some(clues),
            feedback: Some(ClueFeedback::all_match()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            correct: false,
            message: MSG_NOT_FOUND.to_string(),
            guessed_player_name: None,
            guessed_player_clues: None,
            feedback: None,
        }
    }

    pub fn try_again(name: impl Into<String>, clues: ClueSet, feedback: ClueFeedback) -> Self {
        Self {
            correct: false,
            message: MSG_TRY_AGAIN.to_string(),
            guessed_player_name: Some(name.into()),
            guessed_player_clues: Some(clues),
            feedback: Some(feedback),
        }
    }
}

fn empty_object_when_none<S>(feedback: &Option<ClueFeedback>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;

    match feedback {
        Some(feedback) => feedback.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
