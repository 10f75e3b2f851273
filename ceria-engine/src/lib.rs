//! Ceria Assessment Engine
//!
//! Platform-agnostic CHC cognitive-assessment aggregation for the Ceria
//! children's app. The crate turns raw mini-game telemetry into per-domain
//! rolling statistics, development-level classifications, and achievement
//! unlocks, without UI or platform-specific dependencies.
//!
//! Game and test collaborators hold a reference to one
//! [`AssessmentEngine`] and submit immutable records; the presentation
//! layer reads borrowed snapshots back.

pub mod achievements;
pub mod classify;
pub mod constants;
pub mod domain;
pub mod engine;
pub mod numbers;
pub mod oneshot;
pub mod score;
pub mod stats;

// Re-export commonly used types
pub use achievements::{
    AchievementBook, AchievementNotice, AchievementSpec, GrantOutcome, Rarity, domain_debut_id,
};
pub use classify::{DevelopmentLevel, classify};
pub use domain::{Domain, DomainCode, GameKind, UnknownGameKind};
pub use engine::{AssessmentEngine, EngineConfig, RecordError};
pub use oneshot::{PersonalityProfile, TestKind, TestResult, TestUpdate, UnknownTestKind};
pub use score::{Difficulty, DifficultyTier, NormalizedScore, ScoreWeights, normalize};
pub use stats::{DomainStats, SessionRecord, SessionValidationError};
