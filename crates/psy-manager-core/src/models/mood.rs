//! Mood tags attached to session notes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Qualitative outcome of a session, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Critical,
    Concerning,
    Neutral,
    Good,
    Excellent,
}

/// Score used for an untagged note.
pub const UNTAGGED_SCORE: u8 = 3;

impl Mood {
    /// All moods, worst first.
    pub const ALL: [Mood; 5] = [
        Mood::Critical,
        Mood::Concerning,
        Mood::Neutral,
        Mood::Good,
        Mood::Excellent,
    ];

    /// Numeric score on a 1..=5 scale.
    pub fn score(self) -> u8 {
        match self {
            Mood::Critical => 1,
            Mood::Concerning => 2,
            Mood::Neutral => 3,
            Mood::Good => 4,
            Mood::Excellent => 5,
        }
    }

    /// Wire name, as used in seed data and across the FFI.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Critical => "critical",
            Mood::Concerning => "concerning",
            Mood::Neutral => "neutral",
            Mood::Good => "good",
            Mood::Excellent => "excellent",
        }
    }
}

/// Scoring for trend arithmetic. An absent mood counts as neutral.
///
/// Display code must not reuse this: an absent mood is shown as
/// "unevaluated", see [`crate::display::mood_label`].
pub fn mood_score(mood: Option<Mood>) -> u8 {
    mood.map(Mood::score).unwrap_or(UNTAGGED_SCORE)
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known mood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown mood: {0}")]
pub struct MoodParseError(pub String);

impl FromStr for Mood {
    type Err = MoodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == lowered)
            .ok_or_else(|| MoodParseError(s.to_string()))
    }
}
