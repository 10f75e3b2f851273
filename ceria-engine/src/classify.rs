//! Development-level classification bands.

use serde::{Deserialize, Serialize};

use crate::constants::{LEVEL_BAIK_MIN, LEVEL_SANGAT_BAIK_MIN, LEVEL_SESUAI_USIA_MIN};

/// Ordinal development band derived from a domain's average score.
///
/// Variants are ordered worst-to-best so that `Ord` compares development
/// progress directly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentLevel {
    /// Below 55: needs extra attention.
    #[default]
    PerluPerhatianLebih,
    /// 55 to 69: age-appropriate.
    SesuaiUsia,
    /// 70 to 84: good.
    Baik,
    /// 85 and above: very good.
    SangatBaik,
}

impl DevelopmentLevel {
    /// Label shown to parents on the dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PerluPerhatianLebih => "Perlu Perhatian Lebih",
            Self::SesuaiUsia => "Sesuai Usia",
            Self::Baik => "Baik",
            Self::SangatBaik => "Sangat Baik",
        }
    }
}

impl std::fmt::Display for DevelopmentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Map an average score percentage onto its development band.
///
/// Bands are contiguous, exhaustive over `0..=100`, and inclusive on their
/// lower bound.
#[must_use]
pub const fn classify(average_score: u32) -> DevelopmentLevel {
    if average_score >= LEVEL_SANGAT_BAIK_MIN {
        DevelopmentLevel::SangatBaik
    } else if average_score >= LEVEL_BAIK_MIN {
        DevelopmentLevel::Baik
    } else if average_score >= LEVEL_SESUAI_USIA_MIN {
        DevelopmentLevel::SesuaiUsia
    } else {
        DevelopmentLevel::PerluPerhatianLebih
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(classify(54), DevelopmentLevel::PerluPerhatianLebih);
        assert_eq!(classify(55), DevelopmentLevel::SesuaiUsia);
        assert_eq!(classify(69), DevelopmentLevel::SesuaiUsia);
        assert_eq!(classify(70), DevelopmentLevel::Baik);
        assert_eq!(classify(84), DevelopmentLevel::Baik);
        assert_eq!(classify(85), DevelopmentLevel::SangatBaik);
        assert_eq!(classify(100), DevelopmentLevel::SangatBaik);
        assert_eq!(classify(0), DevelopmentLevel::PerluPerhatianLebih);
    }

    #[test]
    fn levels_order_by_progress() {
        assert!(DevelopmentLevel::SangatBaik > DevelopmentLevel::Baik);
        assert!(DevelopmentLevel::Baik > DevelopmentLevel::SesuaiUsia);
        assert!(DevelopmentLevel::SesuaiUsia > DevelopmentLevel::PerluPerhatianLebih);
    }

    #[test]
    fn labels_match_dashboard_copy() {
        assert_eq!(DevelopmentLevel::SangatBaik.label(), "Sangat Baik");
        assert_eq!(
            DevelopmentLevel::PerluPerhatianLebih.to_string(),
            "Perlu Perhatian Lebih"
        );
    }
}
