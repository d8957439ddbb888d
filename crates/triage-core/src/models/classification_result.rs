use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Mood, Prediction, PriorityBand};

/// Per-turn result handed to the presenter. Not persisted as such; only
/// the (text, mood, department) projection is written back to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub turn_id: Uuid,
    pub query_text: String,
    pub mood: Prediction,
    pub department: Prediction,
    /// `None` when the mood is unclassified or outside the known set.
    pub priority: Option<u8>,
}

impl ClassificationResult {
    pub fn band(&self) -> Option<PriorityBand> {
        self.priority.map(PriorityBand::for_priority)
    }

    /// The triple to write back, if both labels are usable as a stored example.
    pub fn persistable(&self) -> Option<(&str, &str, &str)> {
        let mood = self.mood.label()?.parse::<Mood>().ok()?;
        let department = self.department.label()?;
        Some((&self.query_text, mood.as_str(), department))
    }
}
