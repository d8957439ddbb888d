use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mood;
use crate::errors::{TriageError, TriageResult};

/// Where a stored example came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleSource {
    /// Loaded by the seeder from the curated seed set.
    Seed,
    /// Written back by the session loop after a classified turn.
    Interaction,
}

impl ExampleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Interaction => "interaction",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "seed" => Some(Self::Seed),
            "interaction" => Some(Self::Interaction),
            _ => None,
        }
    }
}

/// A validated example that has not been stored yet.
///
/// Both labels are required: there is no way to build a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExample {
    text: String,
    mood_label: String,
    department_label: String,
    source: ExampleSource,
}

impl NewExample {
    /// Validate and build. Text and labels are trimmed; none may be empty.
    /// The mood must be one of the known moods and is stored in its
    /// canonical spelling.
    pub fn new(
        text: impl Into<String>,
        mood_label: impl Into<String>,
        department_label: impl Into<String>,
        source: ExampleSource,
    ) -> TriageResult<Self> {
        let text = text.into().trim().to_string();
        let mood_label = mood_label.into().trim().to_string();
        let department_label = department_label.into().trim().to_string();

        if text.is_empty() {
            return Err(TriageError::InvalidExample {
                reason: "text is empty".to_string(),
            });
        }
        if mood_label.is_empty() {
            return Err(TriageError::InvalidExample {
                reason: format!("mood label is empty for {text:?}"),
            });
        }
        let mood_label = match mood_label.parse::<Mood>() {
            Ok(mood) => mood.as_str().to_string(),
            Err(_) => {
                return Err(TriageError::InvalidExample {
                    reason: format!("unknown mood {mood_label:?} for {text:?}"),
                })
            }
        };
        if department_label.is_empty() {
            return Err(TriageError::InvalidExample {
                reason: format!("department label is empty for {text:?}"),
            });
        }

        Ok(Self {
            text,
            mood_label,
            department_label,
            source,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mood_label(&self) -> &str {
        &self.mood_label
    }

    pub fn department_label(&self) -> &str {
        &self.department_label
    }

    pub fn source(&self) -> ExampleSource {
        self.source
    }

    /// blake3 hash over the (text, mood, department) triple.
    ///
    /// Two examples with the same hash are the same labeled utterance,
    /// regardless of source or id.
    pub fn content_hash(&self) -> String {
        Self::hash_triple(&self.text, &self.mood_label, &self.department_label)
    }

    pub fn hash_triple(text: &str, mood_label: &str, department_label: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(text.trim().as_bytes());
        hasher.update(&[0x1f]);
        hasher.update(mood_label.trim().as_bytes());
        hasher.update(&[0x1f]);
        hasher.update(department_label.trim().as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

/// A stored example.
///
/// `id` is assigned by the store, strictly increasing in insertion order,
/// and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub id: i64,
    pub text: String,
    pub mood_label: String,
    pub department_label: String,
    pub content_hash: String,
    pub source: ExampleSource,
    pub created_at: DateTime<Utc>,
}

impl Example {
    /// The (text, mood) view handed to the mood classifier.
    pub fn mood_view(&self) -> LabeledText {
        LabeledText {
            text: self.text.clone(),
            label: self.mood_label.clone(),
        }
    }

    /// The (text, department) view handed to the department classifier.
    pub fn department_view(&self) -> LabeledText {
        LabeledText {
            text: self.text.clone(),
            label: self.department_label.clone(),
        }
    }

    /// Projection to the (text, mood, department) triple.
    pub fn triple(&self) -> (&str, &str, &str) {
        (&self.text, &self.mood_label, &self.department_label)
    }
}

/// One few-shot example as the external classifier sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledText {
    pub text: String,
    pub label: String,
}

impl LabeledText {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_text() {
        let err = NewExample::new("   ", "Neutral", "Legal", ExampleSource::Seed).unwrap_err();
        assert!(matches!(err, TriageError::InvalidExample { .. }));
    }

    #[test]
    fn rejects_missing_labels() {
        assert!(NewExample::new("hi", "", "Legal", ExampleSource::Seed).is_err());
        assert!(NewExample::new("hi", "Neutral", " ", ExampleSource::Seed).is_err());
    }

    #[test]
    fn unknown_mood_rejected() {
        let err = NewExample::new("hi", "Happy", "Legal", ExampleSource::Seed).unwrap_err();
        assert!(matches!(err, TriageError::InvalidExample { .. }));
        assert!(err.to_string().contains("Happy"));
    }

    #[test]
    fn mood_stored_in_canonical_case() {
        let ex = NewExample::new("hi", "fRUSTRATED", "Legal", ExampleSource::Interaction).unwrap();
        assert_eq!(ex.mood_label(), "Frustrated");
    }

    #[test]
    fn trims_fields() {
        let ex = NewExample::new("  hello ", " Joyful", "Medical ", ExampleSource::Interaction)
            .unwrap();
        assert_eq!(ex.text(), "hello");
        assert_eq!(ex.mood_label(), "Joyful");
        assert_eq!(ex.department_label(), "Medical");
    }

    #[test]
    fn hash_ignores_source() {
        let a = NewExample::new("suit", "Frustrated", "Equipment", ExampleSource::Seed).unwrap();
        let b = NewExample::new("suit", "Frustrated", "Equipment", ExampleSource::Interaction)
            .unwrap();
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn hash_separates_fields() {
        let a = NewExample::hash_triple("ab", "c", "d");
        let b = NewExample::hash_triple("a", "bc", "d");
        assert_ne!(a, b);
    }
}
