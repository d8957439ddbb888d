use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TriageError;

/// Closed set of moods the classifier may report.
///
/// Declaration order is urgency order: `Despair` is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mood {
    Despair,
    Sorrowful,
    Frustrated,
    Anxious,
    Irritated,
    Neutral,
    Satisfied,
    Joyful,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Despair,
        Mood::Sorrowful,
        Mood::Frustrated,
        Mood::Anxious,
        Mood::Irritated,
        Mood::Neutral,
        Mood::Satisfied,
        Mood::Joyful,
    ];

    /// Priority, 1 (most urgent) through 8 (least urgent).
    pub fn priority(&self) -> u8 {
        match self {
            Self::Despair => 1,
            Self::Sorrowful => 2,
            Self::Frustrated => 3,
            Self::Anxious => 4,
            Self::Irritated => 5,
            Self::Neutral => 6,
            Self::Satisfied => 7,
            Self::Joyful => 8,
        }
    }

    pub fn band(&self) -> PriorityBand {
        PriorityBand::for_priority(self.priority())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Despair => "Despair",
            Self::Sorrowful => "Sorrowful",
            Self::Frustrated => "Frustrated",
            Self::Anxious => "Anxious",
            Self::Irritated => "Irritated",
            Self::Neutral => "Neutral",
            Self::Satisfied => "Satisfied",
            Self::Joyful => "Joyful",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = TriageError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TriageError::UnknownMood {
                label: s.to_string(),
            })
    }
}

/// Coarse urgency bucket used by presenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    /// Priorities 1-2.
    Critical,
    /// Priorities 3-4.
    Elevated,
    /// Priorities 5-8.
    Routine,
}

impl PriorityBand {
    pub fn for_priority(priority: u8) -> Self {
        match priority {
            0..=2 => Self::Critical,
            3..=4 => Self::Elevated,
            _ => Self::Routine,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Elevated => "elevated",
            Self::Routine => "routine",
        }
    }
}
