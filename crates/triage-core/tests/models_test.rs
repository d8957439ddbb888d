//! Model tests: mood priorities, prediction handling, persistable projection.

use proptest::prelude::*;
use uuid::Uuid;

use triage_core::{ClassificationResult, ExampleSource, Mood, NewExample, Prediction, PriorityBand};

fn result(mood: Prediction, department: Prediction, priority: Option<u8>) -> ClassificationResult {
    ClassificationResult {
        turn_id: Uuid::new_v4(),
        query_text: "My suit is damaged".to_string(),
        mood,
        department,
        priority,
    }
}

#[test]
fn endpoints_of_priority_table() {
    assert_eq!("Despair".parse::<Mood>().unwrap().priority(), 1);
    assert_eq!("Joyful".parse::<Mood>().unwrap().priority(), 8);
    assert_eq!("Frustrated".parse::<Mood>().unwrap().priority(), 3);
}

#[test]
fn persistable_requires_both_labels() {
    let r = result(
        Prediction::Label("Frustrated".to_string()),
        Prediction::Unclassified,
        Some(3),
    );
    assert!(r.persistable().is_none());

    let r = result(
        Prediction::Unclassified,
        Prediction::Label("Legal".to_string()),
        None,
    );
    assert!(r.persistable().is_none());
}

#[test]
fn persistable_rejects_unknown_mood() {
    let r = result(
        Prediction::Label("Elated".to_string()),
        Prediction::Label("Legal".to_string()),
        None,
    );
    assert!(r.persistable().is_none());
}

#[test]
fn persistable_projects_triple() {
    let r = result(
        Prediction::Label("Frustrated".to_string()),
        Prediction::Label("Equipment Maintenance".to_string()),
        Some(3),
    );
    assert_eq!(
        r.persistable(),
        Some(("My suit is damaged", "Frustrated", "Equipment Maintenance"))
    );
    assert_eq!(r.band(), Some(PriorityBand::Elevated));
}

#[test]
fn persistable_canonicalises_mood_casing() {
    let r = result(
        Prediction::Label("frustrated".to_string()),
        Prediction::Label("Equipment Maintenance".to_string()),
        Some(3),
    );
    assert_eq!(
        r.persistable(),
        Some(("My suit is damaged", "Frustrated", "Equipment Maintenance"))
    );
}

#[test]
fn prediction_display() {
    assert_eq!(Prediction::Label("Legal".into()).to_string(), "Legal");
    assert_eq!(Prediction::Unclassified.to_string(), "Unclassified");
}

proptest! {
    #[test]
    fn prop_priority_is_pure(idx in 0usize..8) {
        let mood = Mood::ALL[idx];
        let first = mood.priority();
        for _ in 0..3 {
            prop_assert_eq!(mood.priority(), first);
        }
        prop_assert_eq!(mood.to_string().to_lowercase().parse::<Mood>().unwrap(), mood);
    }

    #[test]
    fn prop_hash_ignores_outer_whitespace(
        text in "[a-zA-Z][a-zA-Z ]{0,40}[a-zA-Z]",
        pad in "[ \t]{0,4}",
    ) {
        let a = NewExample::new(text.clone(), "Neutral", "Legal", ExampleSource::Seed).unwrap();
        let b = NewExample::new(format!("{pad}{text}{pad}"), "Neutral", "Legal", ExampleSource::Seed)
            .unwrap();
        prop_assert_eq!(a.content_hash(), b.content_hash());
    }
}
