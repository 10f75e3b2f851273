//! CHC broad-ability registry and the mini-game mapping.
//!
//! The registry is a closed set: the eight Cattell-Horn-Carroll broad
//! abilities, each with exactly three narrow abilities, plus a total mapping
//! from every repeatable mini-game onto the ability it exercises. Unknown
//! game identifiers are a representable outcome, never a panic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The eight CHC broad-ability codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DomainCode {
    /// Fluid reasoning.
    Gf,
    /// Comprehension-knowledge.
    Gc,
    /// Visual processing.
    Gv,
    /// Short-term memory.
    Gsm,
    /// Long-term storage and retrieval.
    Glr,
    /// Processing speed.
    Gs,
    /// Auditory processing.
    Ga,
    /// Decision and reaction speed.
    Gt,
}

impl DomainCode {
    /// All domains in registry order.
    pub const ALL: [Self; 8] = [
        Self::Gf,
        Self::Gc,
        Self::Gv,
        Self::Gsm,
        Self::Glr,
        Self::Gs,
        Self::Ga,
        Self::Gt,
    ];

    /// Lowercase key used in achievement ids and reports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gf => "gf",
            Self::Gc => "gc",
            Self::Gv => "gv",
            Self::Gsm => "gsm",
            Self::Glr => "glr",
            Self::Gs => "gs",
            Self::Ga => "ga",
            Self::Gt => "gt",
        }
    }

    /// Indonesian display name shown on the dashboard.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gf => "Penalaran Fluid",
            Self::Gc => "Pengetahuan & Bahasa",
            Self::Gv => "Pemrosesan Visual",
            Self::Gsm => "Memori Jangka Pendek",
            Self::Glr => "Memori Jangka Panjang",
            Self::Gs => "Kecepatan Pemrosesan",
            Self::Ga => "Pemrosesan Auditori",
            Self::Gt => "Kecepatan Reaksi",
        }
    }

    /// The three narrow abilities assessed under this broad ability.
    #[must_use]
    pub const fn narrow_abilities(self) -> [&'static str; 3] {
        match self {
            Self::Gf => [
                "Induction",
                "General Sequential Reasoning",
                "Quantitative Reasoning",
            ],
            Self::Gc => [
                "Lexical Knowledge",
                "Language Development",
                "General Information",
            ],
            Self::Gv => ["Visualization", "Spatial Relations", "Closure Speed"],
            Self::Gsm => ["Memory Span", "Working Memory", "Attentional Control"],
            Self::Glr => [
                "Associative Memory",
                "Meaningful Memory",
                "Naming Facility",
            ],
            Self::Gs => [
                "Perceptual Speed",
                "Rate of Test Taking",
                "Number Facility",
            ],
            Self::Ga => [
                "Phonetic Coding",
                "Speech Sound Discrimination",
                "Memory for Sound Patterns",
            ],
            Self::Gt => [
                "Simple Reaction Time",
                "Choice Reaction Time",
                "Inspection Time",
            ],
        }
    }
}

impl fmt::Display for DomainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Immutable registry entry, exposed for read-only dashboard snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub code: DomainCode,
    pub display_name: &'static str,
    pub narrow_abilities: [&'static str; 3],
}

impl Domain {
    /// Look up the registry entry for a broad-ability code.
    #[must_use]
    pub const fn of(code: DomainCode) -> Self {
        Self {
            code,
            display_name: code.display_name(),
            narrow_abilities: code.narrow_abilities(),
        }
    }
}

/// Identifiers for the repeatable mini-games that emit session telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameKind {
    NumberSequence,
    Memory,
    WordPuzzle,
    PatternRecognition,
    Motor,
    Auditory,
    Processing,
    LongTermMemory,
}

impl GameKind {
    /// All game kinds, in the same order as the domains they exercise.
    pub const ALL: [Self; 8] = [
        Self::NumberSequence,
        Self::WordPuzzle,
        Self::PatternRecognition,
        Self::Memory,
        Self::LongTermMemory,
        Self::Processing,
        Self::Auditory,
        Self::Motor,
    ];

    /// Total mapping from game onto the broad ability it exercises.
    #[must_use]
    pub const fn domain(self) -> DomainCode {
        match self {
            Self::NumberSequence => DomainCode::Gf,
            Self::WordPuzzle => DomainCode::Gc,
            Self::PatternRecognition => DomainCode::Gv,
            Self::Memory => DomainCode::Gsm,
            Self::LongTermMemory => DomainCode::Glr,
            Self::Processing => DomainCode::Gs,
            Self::Auditory => DomainCode::Ga,
            Self::Motor => DomainCode::Gt,
        }
    }

    /// Wire identifier used by game collaborators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NumberSequence => "numberSequence",
            Self::Memory => "memory",
            Self::WordPuzzle => "wordPuzzle",
            Self::PatternRecognition => "patternRecognition",
            Self::Motor => "motor",
            Self::Auditory => "auditory",
            Self::Processing => "processing",
            Self::LongTermMemory => "longTermMemory",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised when a collaborator submits a game identifier outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game type '{0}'")]
pub struct UnknownGameKind(pub String);

impl FromStr for GameKind {
    type Err = UnknownGameKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownGameKind(s.to_string()))
    }
}
