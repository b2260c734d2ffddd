//! Shared API request/response types

pub mod types;

pub use types::{ClueFeedback, GuessFeedback, GuessRequest, JerseyHint, PlayerSummary};
