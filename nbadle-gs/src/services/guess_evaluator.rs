//! Guess evaluation
//!
//! Compares a guessed player against today's answer. Only the day's answer
//! can fail the request (no active players); an unknown name or an
//! unreachable stats service still produce feedback.

use nbadle_common::api::{ClueFeedback, GuessFeedback, JerseyHint};
use nbadle_common::models::ClueSet;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

use super::attribute_fetcher::AttributeFetcher;
use super::daily_selector::{DailySelector, SelectionError};
use crate::roster::{normalize_name, PlayerRoster};

pub struct GuessEvaluator {
    selector: Arc<DailySelector>,
    roster: Arc<PlayerRoster>,
    fetcher: Arc<AttributeFetcher>,
}

impl GuessEvaluator {
    pub fn new(selector: Arc<DailySelector>, roster: Arc<PlayerRoster>, fetcher: Arc<AttributeFetcher>) -> Self {
        Self {
            selector,
            roster,
            fetcher,
        }
    }

    pub async fn evaluate(&self, guess: &str) -> Result<GuessFeedback, SelectionError> {
        let normalized = normalize_name(guess);
        let answer = self.selector.todays_selection().await?;

        if normalized == normalize_name(&answer.full_name) {
            debug!(player_id = answer.player_id, "Correct guess");
            return Ok(GuessFeedback::correct(answer.full_name.clone(), answer.clues.clone()));
        }

        let Some(player) = self.roster.find_by_name(&normalized) else {
            debug!(guess = %guess, "Guess does not name a known player");
            return Ok(GuessFeedback::not_found());
        };

        let guessed = self.fetcher.resolve_clues(player).await;
        let feedback = compare_clues(&guessed.clues, &answer.clues);
        debug!(
            player_id = player.id,
            source = ?guessed.source,
            ?feedback,
            "Incorrect guess evaluated"
        );

        Ok(GuessFeedback::try_again(player.full_name.clone(), guessed.clues, feedback))
    }
}

/// Per-clue comparison of a guess against the answer
///
/// Team and position compare case-insensitively; the jersey compares as raw
/// text, with a direction hint only when both sides are integers.
pub fn compare_clues(guessed: &ClueSet, correct: &ClueSet) -> ClueFeedback {
    let jersey_match = guessed.jersey == correct.jersey;

    ClueFeedback {
        team_match: text_matches(&guessed.team_name, &correct.team_name),
        position_match: text_matches(&guessed.position, &correct.position),
        jersey_match,
        jersey_hint: if jersey_match {
            JerseyHint::None
        } else {
            jersey_hint(&guessed.jersey, &correct.jersey)
        },
    }
}

/// Which way the correct jersey lies from the guessed one
pub fn jersey_hint(guessed: &str, correct: &str) -> JerseyHint {
    let (Ok(guessed), Ok(correct)) = (guessed.trim().parse::<i64>(), correct.trim().parse::<i64>()) else {
        return JerseyHint::None;
    };

    match guessed.cmp(&correct) {
        Ordering::Greater => JerseyHint::Down,
        Ordering::Less => JerseyHint::Up,
        Ordering::Equal => JerseyHint::None,
    }
}

fn text_matches(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::attribute_fetcher::RetryPolicy;
    use crate::services::stats_client::{fields, AttributeProvider, AttributeRow, ProviderError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use nbadle_common::api::types::{MSG_CORRECT, MSG_NOT_FOUND, MSG_TRY_AGAIN};
    use nbadle_common::models::PlayerId;
    use nbadle_common::time::FixedClock;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
    use std::time::Duration;

    /// Serves fixed rows by player id; unknown ids fail
    struct TableProvider {
        rows: HashMap<PlayerId, AttributeRow>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl AttributeProvider for TableProvider {
        fn source_id(&self) -> &'static str {
            "table"
        }

        async fn fetch_attributes(&self, player_id: PlayerId, _: Duration) -> Result<AttributeRow, ProviderError> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            self.rows
                .get(&player_id)
                .cloned()
                .ok_or_else(|| ProviderError::Api(500, "no row".into()))
        }
    }

    fn row(city: &str, team: &str, position: &str, jersey: &str) -> AttributeRow {
        AttributeRow::new()
            .with(fields::TEAM_CITY, city)
            .with(fields::TEAM_NAME, team)
            .with(fields::POSITION, position)
            .with(fields::JERSEY, jersey)
    }

    fn clues(team: &str, position: &str, jersey: &str) -> ClueSet {
        ClueSet {
            team_city: String::new(),
            team_name: team.to_string(),
            position: position.to_string(),
            jersey: jersey.to_string(),
        }
    }

    /// Luka is the only active player, so he is always the answer
    fn evaluator() -> (GuessEvaluator, Arc<TableProvider>) {
        let roster = Arc::new(
            PlayerRoster::from_json_str(
                r#"[
                {"id": 1629029, "full_name": "Luka Doncic", "is_active": true},
                {"id": 201939, "full_name": "Stephen Curry", "is_active": false},
                {"id": 1628983, "full_name": "Shai Gilgeous-Alexander", "is_active": false,
                 "team_city": "Oklahoma City", "team_name": "Thunder", "position": "Guard", "jersey": "2"},
                {"id": 1, "full_name": "Mystery Man", "is_active": false}
            ]"#,
            )
            .unwrap(),
        );

        let mut rows = HashMap::new();
        rows.insert(1629029, row("Dallas", "Mavericks", "Guard-Forward", "77"));
        rows.insert(201939, row("Golden State", "Warriors", "Guard", "30"));
        rows.insert(1, row("Dallas", "mavericks", "GUARD-FORWARD", "00"));
        let provider = Arc::new(TableProvider {
            rows,
            calls: AtomicU32::new(0),
        });

        let policy = RetryPolicy {
            max_attempts: 2,
            timeout_backoff: Duration::from_millis(20),
            error_backoff: Duration::from_millis(10),
            request_timeout: Duration::from_secs(1),
        };
        let fetcher = Arc::new(AttributeFetcher::new(provider.clone(), policy));
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        let selector = Arc::new(DailySelector::new(roster.clone(), fetcher.clone(), clock));

        (GuessEvaluator::new(selector, roster, fetcher), provider)
    }

    #[tokio::test(start_paused = true)]
    async fn test_correct_guess_any_case() {
        let (evaluator, provider) = evaluator();

        for guess in ["Luka Doncic", "luka doncic", "LUKA DONCIC", "  Luka Doncic "] {
            let feedback = evaluator.evaluate(guess).await.unwrap();
            assert!(feedback.correct, "guess {:?}", guess);
            assert_eq!(feedback.message, MSG_CORRECT);
            assert_eq!(feedback.guessed_player_name.as_deref(), Some("Luka Doncic"));
            assert_eq!(feedback.feedback, Some(ClueFeedback::all_match()));
        }
        // Only the answer lookup; the short-circuit makes no call
        assert_eq!(provider.calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_incorrect_guess_feedback() {
        let (evaluator, _) = evaluator();

        let feedback = evaluator.evaluate("Stephen Curry").await.unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.message, MSG_TRY_AGAIN);
        assert_eq!(feedback.guessed_player_name.as_deref(), Some("Stephen Curry"));
        assert_eq!(
            feedback.guessed_player_clues.as_ref().map(|c| c.team_name.as_str()),
            Some("Warriors")
        );
        assert_eq!(
            feedback.feedback,
            Some(ClueFeedback {
                team_match: false,
                position_match: false,
                jersey_match: false,
                jersey_hint: JerseyHint::Up,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_name_not_found() {
        let (evaluator, _) = evaluator();

        for guess in ["Nobody Atall", "", "Luka"] {
            let feedback = evaluator.evaluate(guess).await.unwrap();
            assert!(!feedback.correct);
            assert_eq!(feedback.message, MSG_NOT_FOUND);
            assert!(feedback.feedback.is_none());
            assert!(feedback.guessed_player_name.is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_guess_uses_fallback_when_provider_fails() {
        let (evaluator, _) = evaluator();

        let feedback = evaluator.evaluate("shai gilgeous-alexander").await.unwrap();
        assert_eq!(
            feedback.guessed_player_name.as_deref(),
            Some("Shai Gilgeous-Alexander")
        );
        assert_eq!(feedback.guessed_player_clues.unwrap().team_name, "Thunder");
        let flags = feedback.feedback.unwrap();
        assert!(!flags.team_match);
        assert_eq!(flags.jersey_hint, JerseyHint::Up);
    }

    #[tokio::test(start_paused = true)]
    async fn test_textual_clues_case_insensitive() {
        let (evaluator, _) = evaluator();

        let flags = evaluator.evaluate("Mystery Man").await.unwrap().feedback.unwrap();
        assert!(flags.team_match);
        assert!(flags.position_match);
        assert!(!flags.jersey_match);
        assert_eq!(flags.jersey_hint, JerseyHint::Up);
    }

    #[test]
    fn test_jersey_hint_direction() {
        assert_eq!(jersey_hint("30", "77"), JerseyHint::Up);
        assert_eq!(jersey_hint("90", "77"), JerseyHint::Down);
        assert_eq!(jersey_hint("77", "77"), JerseyHint::None);
    }

    #[test]
    fn test_jersey_hint_requires_two_integers() {
        assert_eq!(jersey_hint("abc", "77"), JerseyHint::None);
        assert_eq!(jersey_hint("30", ""), JerseyHint::None);
        assert_eq!(jersey_hint("", ""), JerseyHint::None);
        assert_eq!(jersey_hint("3.5", "77"), JerseyHint::None);
    }

    #[test]
    fn test_jersey_text_differs_but_value_equal() {
        // "00" and "0" are different jerseys; no direction applies
        let feedback = compare_clues(&clues("A", "G", "00"), &clues("A", "G", "0"));
        assert!(!feedback.jersey_match);
        assert_eq!(feedback.jersey_hint, JerseyHint::None);
    }

    #[test]
    fn test_matching_jersey_has_no_hint() {
        let feedback = compare_clues(&clues("Warriors", "Guard", "30"), &clues("warriors", "guard", "30"));
        assert_eq!(
            feedback,
            ClueFeedback {
                team_match: true,
                position_match: true,
                jersey_match: true,
                jersey_hint: JerseyHint::None,
            }
        );
    }
}
