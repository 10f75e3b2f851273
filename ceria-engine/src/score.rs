//! Configurable score normalization shared by every mini-game.
//!
//! Each game supplies its own [`ScoreWeights`]; none of the per-game
//! formulas is canonical. Normalization is a pure function of the round
//! telemetry and the supplied weights.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{SCORE_CEILING, SCORE_FLOOR, STAR_BASE_POINTS};
use crate::numbers::round_f64_to_u32;

/// Session difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Per-difficulty performance budgets used for the star rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Finish within this many seconds to stay in the strict band.
    pub time_budget_secs: f64,
    /// At most this many errors to stay in the strict band.
    pub error_budget: u32,
    /// Relaxed band: time budget scaled by this factor, error budget doubled.
    #[serde(default = "DifficultyTier::default_relaxed_scale")]
    pub relaxed_scale: f64,
}

impl DifficultyTier {
    const fn default_relaxed_scale() -> f64 {
        1.5
    }
}

/// Scoring weights for one mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "ScoreWeights::default_tiers")]
    pub tiers: HashMap<Difficulty, DifficultyTier>,
    /// Points deducted per error.
    #[serde(default = "ScoreWeights::default_error_penalty")]
    pub error_penalty: f64,
    /// Points deducted per hint used.
    #[serde(default = "ScoreWeights::default_hint_penalty")]
    pub hint_penalty: f64,
    /// Maximum bonus for finishing well under the time budget.
    #[serde(default = "ScoreWeights::default_time_bonus_max")]
    pub time_bonus_max: f64,
    #[serde(default = "ScoreWeights::default_multipliers")]
    pub multipliers: HashMap<Difficulty, f64>,
}

impl ScoreWeights {
    fn default_tiers() -> HashMap<Difficulty, DifficultyTier> {
        HashMap::from([
            (
                Difficulty::Easy,
                DifficultyTier {
                    time_budget_secs: 120.0,
                    error_budget: 3,
                    relaxed_scale: 1.5,
                },
            ),
            (
                Difficulty::Medium,
                DifficultyTier {
                    time_budget_secs: 90.0,
                    error_budget: 2,
                    relaxed_scale: 1.5,
                },
            ),
            (
                Difficulty::Hard,
                DifficultyTier {
                    time_budget_secs: 75.0,
                    error_budget: 1,
                    relaxed_scale: 1.5,
                },
            ),
        ])
    }

    const fn default_error_penalty() -> f64 {
        4.0
    }

    const fn default_hint_penalty() -> f64 {
        2.0
    }

    const fn default_time_bonus_max() -> f64 {
        10.0
    }

    fn default_multipliers() -> HashMap<Difficulty, f64> {
        HashMap::from([
            (Difficulty::Easy, 1.0),
            (Difficulty::Medium, 1.2),
            (Difficulty::Hard, 1.5),
        ])
    }

    /// Budgets for a difficulty, falling back to the built-in tier.
    #[must_use]
    pub fn tier(&self, difficulty: Difficulty) -> DifficultyTier {
        self.tiers.get(&difficulty).copied().unwrap_or_else(|| {
            Self::default_tiers()
                .remove(&difficulty)
                .unwrap_or(DifficultyTier {
                    time_budget_secs: 90.0,
                    error_budget: 2,
                    relaxed_scale: 1.5,
                })
        })
    }

    /// Difficulty multiplier, 1.0 when unconfigured.
    #[must_use]
    pub fn multiplier(&self, difficulty: Difficulty) -> f64 {
        self.multipliers.get(&difficulty).copied().unwrap_or(1.0)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            tiers: Self::default_tiers(),
            error_penalty: Self::default_error_penalty(),
            hint_penalty: Self::default_hint_penalty(),
            time_bonus_max: Self::default_time_bonus_max(),
            multipliers: Self::default_multipliers(),
        }
    }
}

/// Star rating plus bounded numeric score for one finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedScore {
    /// 1 to 3 stars.
    pub stars: u8,
    /// Bounded to 10..=100; the floor guarantees no degenerate score.
    pub score: u32,
}

/// Normalize one finished round into a star rating and a bounded score.
#[must_use]
pub fn normalize(
    time_spent_secs: u32,
    errors: u32,
    hints_used: u32,
    difficulty: Difficulty,
    weights: &ScoreWeights,
) -> NormalizedScore {
    let tier = weights.tier(difficulty);
    let stars = star_rating(time_spent_secs, errors, tier);

    let bonus = if tier.time_budget_secs > 0.0 {
        let remaining =
            (tier.time_budget_secs - f64::from(time_spent_secs)) / tier.time_budget_secs;
        remaining.clamp(0.0, 1.0) * weights.time_bonus_max
    } else {
        0.0
    };
    let penalties =
        f64::from(errors) * weights.error_penalty + f64::from(hints_used) * weights.hint_penalty;

    let raw = (f64::from(stars) * STAR_BASE_POINTS + bonus - penalties).max(SCORE_FLOOR);
    let scaled = (raw * weights.multiplier(difficulty)).clamp(SCORE_FLOOR, SCORE_CEILING);
    NormalizedScore {
        stars,
        score: round_f64_to_u32(scaled),
    }
}

fn star_rating(time_spent_secs: u32, errors: u32, tier: DifficultyTier) -> u8 {
    let time = f64::from(time_spent_secs);
    if time <= tier.time_budget_secs && errors <= tier.error_budget {
        3
    } else if time <= tier.time_budget_secs * tier.relaxed_scale
        && errors <= tier.error_budget.saturating_mul(2)
    {
        2
    } else {
        1
    }
}
