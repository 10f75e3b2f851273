//! One-shot broad-ability test records.
//!
//! Unlike the repeatable mini-games, each of these assessments is taken in
//! a single sitting. Re-taking a test overwrites the previous attempt;
//! there is no best-of-N semantics.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::{DevelopmentLevel, classify};
use crate::numbers::{round_f64_to_u32, round_to_1dp};

/// The one-shot assessments offered by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Cognitive,
    Linguistic,
    Personality,
    Motor,
}

impl TestKind {
    pub const ALL: [Self; 4] = [
        Self::Cognitive,
        Self::Linguistic,
        Self::Personality,
        Self::Motor,
    ];

    /// Wire identifier used by test collaborators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cognitive => "cognitive",
            Self::Linguistic => "linguistic",
            Self::Personality => "personality",
            Self::Motor => "motor",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised when a collaborator submits a test identifier outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown test domain '{0}'")]
pub struct UnknownTestKind(pub String);

impl FromStr for TestKind {
    type Err = UnknownTestKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTestKind(s.to_string()))
    }
}

/// Personality profile reported by the personality test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Four-letter type code, e.g. "ENFP".
    pub type_code: String,
    /// Mascot animal shown to the child, e.g. "Kelinci".
    pub animal: String,
}

/// Result record for one one-shot test.
///
/// Starts in the not-completed state; [`TestResult::complete_with`] merges
/// a finished attempt over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub completed: bool,
    pub score: u32,
    pub total: u32,
    /// `score / total` as a percentage, one decimal.
    pub percentage: f64,
    pub completed_date: Option<DateTime<Utc>>,
    pub time_spent_secs: u32,
    /// Sub-score per narrow ability under the tested broad ability.
    pub narrow_ability_scores: BTreeMap<String, u32>,
    pub development_level: DevelopmentLevel,
    pub age_equivalent: Option<String>,
    pub personality: Option<PersonalityProfile>,
    pub recommendations: Vec<String>,
}

/// Partial record submitted when a test attempt finishes.
///
/// `None` fields leave the existing value in place; supplied fields fully
/// replace it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestUpdate {
    pub score: Option<u32>,
    pub total: Option<u32>,
    pub time_spent_secs: Option<u32>,
    pub narrow_ability_scores: Option<BTreeMap<String, u32>>,
    pub age_equivalent: Option<String>,
    pub personality: Option<PersonalityProfile>,
    pub recommendations: Option<Vec<String>>,
}

impl TestResult {
    /// Merge a finished attempt over this record and mark it completed.
    ///
    /// The percentage and development level are always re-derived from the
    /// merged score and total, never taken from the update.
    pub(crate) fn complete_with(&mut self, update: TestUpdate, now: DateTime<Utc>) {
        if let Some(score) = update.score {
            self.score = score;
        }
        if let Some(total) = update.total {
            self.total = total;
        }
        if let Some(time_spent_secs) = update.time_spent_secs {
            self.time_spent_secs = time_spent_secs;
        }
        if let Some(narrow) = update.narrow_ability_scores {
            self.narrow_ability_scores = narrow;
        }
        if let Some(age_equivalent) = update.age_equivalent {
            self.age_equivalent = Some(age_equivalent);
        }
        if let Some(personality) = update.personality {
            self.personality = Some(personality);
        }
        if let Some(recommendations) = update.recommendations {
            self.recommendations = recommendations;
        }

        self.completed = true;
        self.completed_date = Some(now);
        self.percentage = if self.total > 0 {
            round_to_1dp(f64::from(self.score) * 100.0 / f64::from(self.total))
        } else {
            0.0
        };
        self.development_level = classify(round_f64_to_u32(self.percentage));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 10, minute, 0)
            .single()
            .expect("valid fixture date")
    }

    #[test]
    fn wire_identifiers_round_trip() {
        for kind in TestKind::ALL {
            assert_eq!(kind.as_str().parse::<TestKind>(), Ok(kind));
        }
        assert!("astrology".parse::<TestKind>().is_err());
    }

    #[test]
    fn completion_stamps_date_and_derives_percentage() {
        let mut result = TestResult::default();
        assert!(!result.completed);

        result.complete_with(
            TestUpdate {
                score: Some(17),
                total: Some(20),
                time_spent_secs: Some(310),
                ..TestUpdate::default()
            },
            at(0),
        );

        assert!(result.completed);
        assert_eq!(result.completed_date, Some(at(0)));
        assert!((result.percentage - 85.0).abs() < f64::EPSILON);
        assert_eq!(result.development_level, DevelopmentLevel::SangatBaik);
    }

    #[test]
    fn retake_overwrites_the_previous_attempt() {
        let mut result = TestResult::default();
        result.complete_with(
            TestUpdate {
                personality: Some(PersonalityProfile {
                    type_code: "ENFP".to_string(),
                    animal: "Kelinci".to_string(),
                }),
                ..TestUpdate::default()
            },
            at(0),
        );
        result.complete_with(
            TestUpdate {
                personality: Some(PersonalityProfile {
                    type_code: "ISTJ".to_string(),
                    animal: "Kura-kura".to_string(),
                }),
                ..TestUpdate::default()
            },
            at(5),
        );

        let profile = result.personality.expect("profile recorded");
        assert_eq!(profile.type_code, "ISTJ");
        assert_eq!(profile.animal, "Kura-kura");
        assert_eq!(result.completed_date, Some(at(5)));
    }

    #[test]
    fn zero_total_yields_zero_percentage() {
        let mut result = TestResult::default();
        result.complete_with(
            TestUpdate {
                score: Some(5),
                ..TestUpdate::default()
            },
            at(0),
        );
        assert!((result.percentage - 0.0).abs() < f64::EPSILON);
        assert_eq!(
            result.development_level,
            DevelopmentLevel::PerluPerhatianLebih
        );
    }
}
