//! Centralized balance and tuning constants for the assessment engine.
//!
//! These values define the deterministic math for aggregation and
//! classification. Keeping them together ensures that assessment behavior
//! can only be adjusted via code changes reviewed in version control,
//! rather than through external JSON assets.

// Session aggregation ------------------------------------------------------
pub(crate) const SESSION_HISTORY_WINDOW: usize = 10;
pub(crate) const MAX_SESSION_SCORE: u32 = 100;

// Score normalization ------------------------------------------------------
pub(crate) const STAR_BASE_POINTS: f64 = 30.0;
pub(crate) const SCORE_FLOOR: f64 = 10.0;
pub(crate) const SCORE_CEILING: f64 = 100.0;

// Development-level bands --------------------------------------------------
pub(crate) const LEVEL_SANGAT_BAIK_MIN: u32 = 85;
pub(crate) const LEVEL_BAIK_MIN: u32 = 70;
pub(crate) const LEVEL_SESUAI_USIA_MIN: u32 = 55;

// Built-in achievement rules -----------------------------------------------
pub(crate) const GOLD_STAR_MIN_SCORE: u32 = 90;
pub(crate) const DILIGENT_DOMAIN_PLAYS: u32 = 10;
