use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one few-shot classification call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    Label(String),
    /// No context examples were available, so the external classifier was
    /// not invoked.
    Unclassified,
}

impl Prediction {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Label(l) => Some(l),
            Self::Unclassified => None,
        }
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, Self::Unclassified)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(l) => f.write_str(l),
            Self::Unclassified => f.write_str("Unclassified"),
        }
    }
}
