//! The owned aggregation engine binding every assessment subsystem.
//!
//! Collaborators hold a reference to one [`AssessmentEngine`] instance and
//! submit immutable records; there is no ambient or singleton state. Each
//! public operation is a synchronous run-to-completion state transition:
//! it either applies fully or returns an error having touched nothing.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::achievements::{
    ACH_DILIGENT, ACH_EXPLORER, ACH_FIRST_SESSION, ACH_GOLD_STAR, AchievementBook,
    AchievementNotice, AchievementSpec, GrantOutcome, domain_debut_id,
};
use crate::constants::{DILIGENT_DOMAIN_PLAYS, GOLD_STAR_MIN_SCORE};
use crate::domain::{DomainCode, GameKind, UnknownGameKind};
use crate::oneshot::{TestKind, TestResult, TestUpdate, UnknownTestKind};
use crate::score::ScoreWeights;
use crate::stats::{DomainStats, SessionRecord, SessionValidationError};

/// Raised when an inbound event cannot be applied.
///
/// Every variant leaves the engine state untouched; a malformed event never
/// corrupts unrelated domain state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error(transparent)]
    UnknownGameKind(#[from] UnknownGameKind),
    #[error(transparent)]
    UnknownTestKind(#[from] UnknownTestKind),
    #[error(transparent)]
    InvalidSession(#[from] SessionValidationError),
    #[error("no statistics entry for domain {0}")]
    MissingDomain(DomainCode),
    #[error("no record slot for test '{0}'")]
    MissingTest(TestKind),
}

/// Static configuration consumed at construction: scoring weights and the
/// achievement catalog. Data, not behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fallback weights for games without an override.
    #[serde(default)]
    pub default_weights: ScoreWeights,
    /// Per-game scoring overrides.
    #[serde(default)]
    pub game_weights: HashMap<GameKind, ScoreWeights>,
    #[serde(default = "AchievementBook::default_catalog")]
    pub catalog: Vec<AchievementSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_weights: ScoreWeights::default(),
            game_weights: HashMap::new(),
            catalog: AchievementBook::default_catalog(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration bundle from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the config schema.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Single-writer aggregation engine.
///
/// Owns the per-domain statistics table (all eight domains, zeroed at
/// construction), the one-shot test table, the achievement book, and a
/// single-slot pending unlock notification.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    config: EngineConfig,
    stats: BTreeMap<DomainCode, DomainStats>,
    tests: BTreeMap<TestKind, TestResult>,
    achievements: AchievementBook,
    pending_notification: Option<AchievementNotice>,
}

impl AssessmentEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let stats = DomainCode::ALL
            .into_iter()
            .map(|code| (code, DomainStats::default()))
            .collect();
        let tests = TestKind::ALL
            .into_iter()
            .map(|kind| (kind, TestResult::default()))
            .collect();
        let achievements = AchievementBook::new(config.catalog.clone());
        Self {
            config,
            stats,
            tests,
            achievements,
            pending_notification: None,
        }
    }

    /// Scoring weights for a game, falling back to the defaults.
    #[must_use]
    pub fn weights_for(&self, game: GameKind) -> &ScoreWeights {
        self.config
            .game_weights
            .get(&game)
            .unwrap_or(&self.config.default_weights)
    }

    /// Record a finished round submitted under its wire identifier.
    ///
    /// Unknown game types are logged and rejected without touching any
    /// domain state, as are sessions with out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the game type is outside the registry
    /// or the session fails validation; the engine state is unchanged.
    pub fn record_session(
        &mut self,
        game_type: &str,
        session: SessionRecord,
    ) -> Result<&DomainStats, RecordError> {
        let kind = match game_type.parse::<GameKind>() {
            Ok(kind) => kind,
            Err(err) => {
                warn!("dropping session for unknown game type '{game_type}'");
                return Err(err.into());
            }
        };
        self.record_game_session(kind, session)
    }

    /// Typed variant of [`Self::record_session`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the session fails validation; the
    /// engine state is unchanged.
    pub fn record_game_session(
        &mut self,
        game: GameKind,
        session: SessionRecord,
    ) -> Result<&DomainStats, RecordError> {
        session.validate()?;
        let code = game.domain();
        let score = session.score;
        let stamp = session.timestamp;

        // The table is pre-filled for every domain; the miss path guards
        // against external mapping data growing past the registry.
        let Some(stats) = self.stats.get_mut(&code) else {
            warn!("no statistics entry for domain {code}; dropping session");
            return Err(RecordError::MissingDomain(code));
        };
        stats.apply(session);

        self.evaluate_session_unlocks(code, score, stamp);
        self.stats
            .get(&code)
            .ok_or(RecordError::MissingDomain(code))
    }

    /// Built-in unlock rules, evaluated after every accepted session.
    /// Duplicate grants are absorbed by the book's idempotence.
    fn evaluate_session_unlocks(&mut self, code: DomainCode, score: u32, now: DateTime<Utc>) {
        let domain_total = self.stats.get(&code).map_or(0, |s| s.total_played);
        let overall: u32 = self.stats.values().map(|s| s.total_played).sum();
        let every_domain_played = self.stats.values().all(|s| s.total_played > 0);

        if overall == 1 {
            self.grant_at(ACH_FIRST_SESSION, now);
        }
        if domain_total == 1 {
            self.grant_at(&domain_debut_id(code), now);
        }
        if score >= GOLD_STAR_MIN_SCORE {
            self.grant_at(ACH_GOLD_STAR, now);
        }
        if domain_total >= DILIGENT_DOMAIN_PLAYS {
            self.grant_at(ACH_DILIGENT, now);
        }
        if every_domain_played {
            self.grant_at(ACH_EXPLORER, now);
        }
    }

    /// Record completion of a one-shot test submitted under its wire
    /// identifier. Re-taking a test overwrites the previous attempt.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the test domain is outside the
    /// registry; the engine state is unchanged.
    pub fn record_test_completion(
        &mut self,
        test_domain: &str,
        update: TestUpdate,
    ) -> Result<&TestResult, RecordError> {
        self.record_test_completion_at(test_domain, update, Utc::now())
    }

    /// [`Self::record_test_completion`] with an explicit completion time.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the test domain is outside the
    /// registry; the engine state is unchanged.
    pub fn record_test_completion_at(
        &mut self,
        test_domain: &str,
        update: TestUpdate,
        now: DateTime<Utc>,
    ) -> Result<&TestResult, RecordError> {
        let kind = match test_domain.parse::<TestKind>() {
            Ok(kind) => kind,
            Err(err) => {
                warn!("dropping result for unknown test domain '{test_domain}'");
                return Err(err.into());
            }
        };
        let Some(result) = self.tests.get_mut(&kind) else {
            warn!("no record slot for test {kind}; dropping result");
            return Err(RecordError::MissingTest(kind));
        };
        result.complete_with(update, now);
        Ok(result)
    }

    /// Grant a badge by id, keeping at most one pending notification.
    pub fn grant(&mut self, id: &str) -> GrantOutcome {
        self.grant_at(id, Utc::now())
    }

    /// [`Self::grant`] with an explicit earn time.
    pub fn grant_at(&mut self, id: &str, now: DateTime<Utc>) -> GrantOutcome {
        let outcome = self.achievements.grant(id, now);
        if let GrantOutcome::Granted(notice) = &outcome {
            self.pending_notification = Some(notice.clone());
        }
        outcome
    }

    /// Consume the pending unlock notification, if any. The slot holds the
    /// most recent unconsumed grant and is cleared by this call.
    pub fn take_notification(&mut self) -> Option<AchievementNotice> {
        self.pending_notification.take()
    }

    /// Rolling statistics for one domain.
    #[must_use]
    pub fn domain_stats(&self, code: DomainCode) -> Option<&DomainStats> {
        self.stats.get(&code)
    }

    /// All eight domains in registry order.
    pub fn all_domain_stats(&self) -> impl Iterator<Item = (DomainCode, &DomainStats)> {
        self.stats.iter().map(|(code, stats)| (*code, stats))
    }

    /// Record for one one-shot test.
    #[must_use]
    pub fn test_result(&self, kind: TestKind) -> Option<&TestResult> {
        self.tests.get(&kind)
    }

    /// All one-shot test records.
    pub fn test_results(&self) -> impl Iterator<Item = (TestKind, &TestResult)> {
        self.tests.iter().map(|(kind, result)| (*kind, result))
    }

    /// The achievement book: catalog plus held set.
    #[must_use]
    pub const fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
