use triage_core::ClassificationResult;
use uuid::Uuid;

/// Session loop states.
///
/// `AwaitingInput → Classifying → Reporting → Persisting → AwaitingInput`,
/// with `Ended` reached on the quit keyword or end of input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    AwaitingInput,
    Classifying { turn_id: Uuid, query: String },
    Reporting(ClassificationResult),
    Persisting(ClassificationResult),
    Ended,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingInput => "awaiting_input",
            Self::Classifying { .. } => "classifying",
            Self::Reporting(_) => "reporting",
            Self::Persisting(_) => "persisting",
            Self::Ended => "ended",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }
}
