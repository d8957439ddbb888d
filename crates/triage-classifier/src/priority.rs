//! Mood to priority lookup.

use triage_core::errors::TriageResult;
use triage_core::{Mood, Prediction};

/// Maps a predicted mood onto the fixed 1 (most urgent) to 8 scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityRanker;

impl PriorityRanker {
    pub fn new() -> Self {
        Self
    }

    /// Fails with `UnknownMood` for labels outside the mood vocabulary.
    pub fn priority_of(&self, mood: &str) -> TriageResult<u8> {
        Ok(mood.parse::<Mood>()?.priority())
    }

    /// `None` for an unclassified prediction.
    pub fn rank(&self, prediction: &Prediction) -> TriageResult<Option<u8>> {
        prediction
            .label()
            .map(|label| self.priority_of(label))
            .transpose()
    }
}
