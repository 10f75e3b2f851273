//! Session telemetry and per-domain rolling statistics.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::{DevelopmentLevel, classify};
use crate::constants::{MAX_SESSION_SCORE, SESSION_HISTORY_WINDOW};
use crate::numbers::{mean, round_f64_to_u32, round_to_1dp};
use crate::score::Difficulty;

/// Raised when a collaborator submits session values outside the contract.
///
/// Rejecting at the boundary keeps malformed events from corrupting the
/// rolling averages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionValidationError {
    #[error("session score {0} outside 0..=100")]
    ScoreOutOfRange(u32),
}

/// One finished round of a repeatable mini-game. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub time_spent_secs: u32,
    pub errors: u32,
    pub score: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub hints_used: u32,
    /// Free-text labels supplied by the game for its own bookkeeping.
    #[serde(default)]
    pub domains_touched: Vec<String>,
}

impl SessionRecord {
    /// Build a validated record for a round that just finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the score falls outside `0..=100`.
    pub fn new(
        timestamp: DateTime<Utc>,
        time_spent_secs: u32,
        errors: u32,
        score: u32,
        difficulty: Difficulty,
        hints_used: u32,
    ) -> Result<Self, SessionValidationError> {
        let record = Self {
            timestamp,
            time_spent_secs,
            errors,
            score,
            difficulty,
            hints_used,
            domains_touched: Vec::new(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the value ranges the aggregator relies on.
    ///
    /// Negative time, error, and hint counts are unrepresentable by type;
    /// only the score range needs a runtime check.
    ///
    /// # Errors
    ///
    /// Returns an error if the score falls outside `0..=100`.
    pub fn validate(&self) -> Result<(), SessionValidationError> {
        if self.score > MAX_SESSION_SCORE {
            return Err(SessionValidationError::ScoreOutOfRange(self.score));
        }
        Ok(())
    }
}

/// Rolling aggregate for one broad ability. Mutated only by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainStats {
    /// Lifetime count of accepted sessions; never decreases.
    pub total_played: u32,
    pub average_time_secs: u32,
    /// Mean error count over the recent window, one decimal.
    pub average_errors: f64,
    pub average_score: u32,
    /// Highest score ever recorded; never decreases.
    pub best_score: u32,
    pub development_level: DevelopmentLevel,
    pub last_played: Option<DateTime<Utc>>,
    /// Most recent sessions, oldest first, at most ten.
    pub history: VecDeque<SessionRecord>,
}

impl DomainStats {
    /// Fold one accepted session into the aggregate.
    ///
    /// Averages are taken over the pre-trim working set (up to eleven
    /// entries), so the statistics track the recent window rather than the
    /// lifetime counter. The history is trimmed back to the window size
    /// afterwards and the development level is re-derived from the fresh
    /// average score.
    pub(crate) fn apply(&mut self, session: SessionRecord) {
        self.last_played = Some(session.timestamp);
        self.total_played = self.total_played.saturating_add(1);
        self.best_score = self.best_score.max(session.score);
        self.history.push_back(session);

        self.average_time_secs = round_f64_to_u32(mean(
            self.history.iter().map(|s| f64::from(s.time_spent_secs)),
        ));
        self.average_errors =
            round_to_1dp(mean(self.history.iter().map(|s| f64::from(s.errors))));
        self.average_score =
            round_f64_to_u32(mean(self.history.iter().map(|s| f64::from(s.score))));

        while self.history.len() > SESSION_HISTORY_WINDOW {
            self.history.pop_front();
        }
        self.development_level = classify(self.average_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(offset_secs: i64, score: u32, errors: u32, time_spent_secs: u32) -> SessionRecord {
        let timestamp = Utc
            .with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
            .single()
            .expect("valid fixture date")
            + chrono::Duration::seconds(offset_secs);
        SessionRecord::new(timestamp, time_spent_secs, errors, score, Difficulty::Easy, 0)
            .expect("valid fixture session")
    }

    #[test]
    fn validation_rejects_out_of_range_scores() {
        let err = session(0, 50, 0, 60).validate();
        assert_eq!(err, Ok(()));
        let bad = SessionRecord {
            score: 101,
            ..session(0, 50, 0, 60)
        };
        assert_eq!(
            bad.validate(),
            Err(SessionValidationError::ScoreOutOfRange(101))
        );
    }

    #[test]
    fn history_stays_bounded_and_chronological() {
        let mut stats = DomainStats::default();
        for i in 0..25u32 {
            stats.apply(session(i64::from(i), 50, 0, 60));
        }
        assert_eq!(stats.history.len(), SESSION_HISTORY_WINDOW);
        assert_eq!(stats.total_played, 25);
        let timestamps: Vec<_> = stats.history.iter().map(|s| s.timestamp).collect();
        let mut sorted = timestamps.clone();
        sorted.sort();
        assert_eq!(timestamps, sorted);
        // The window holds the most recent sessions.
        assert_eq!(stats.history.front().map(|s| s.timestamp), Some(session(15, 0, 0, 0).timestamp));
    }

    #[test]
    fn best_score_is_monotonic() {
        let mut stats = DomainStats::default();
        for (i, score) in [40u32, 90, 70, 20, 85].into_iter().enumerate() {
            stats.apply(session(i as i64, score, 0, 60));
            assert!(stats.best_score >= score);
        }
        assert_eq!(stats.best_score, 90);
    }

    #[test]
    fn spec_scenario_three_memory_sessions() {
        let mut stats = DomainStats::default();
        stats.apply(session(0, 60, 2, 100));
        stats.apply(session(1, 90, 0, 60));
        stats.apply(session(2, 75, 1, 80));

        assert_eq!(stats.total_played, 3);
        assert_eq!(stats.best_score, 90);
        assert_eq!(stats.average_score, 75);
        assert_eq!(stats.average_time_secs, 80);
        assert!((stats.average_errors - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.development_level, DevelopmentLevel::Baik);
    }

    #[test]
    fn averages_track_the_window_not_the_lifetime_counter() {
        let mut stats = DomainStats::default();
        for i in 0..20 {
            stats.apply(session(i, 40, 0, 60));
        }
        for i in 20..31 {
            stats.apply(session(i, 100, 0, 60));
        }
        // Only the recent window contributes to the mean.
        assert_eq!(stats.average_score, 100);
        assert_eq!(stats.total_played, 31);
    }
}
