//! Seeding against a real store: idempotence, top-up, file-backed tables.

use std::sync::Arc;

use triage_core::config::SeedConfig;
use triage_core::traits::IExampleStore;
use triage_core::{ExampleSource, NewExample};
use triage_embeddings::TfIdfFallback;
use triage_retrieval::{builtin_seed_set, load_seed_set, Seeder, SeedSet};
use triage_storage::ExampleStore;

fn store() -> Arc<dyn IExampleStore> {
    Arc::new(ExampleStore::open_in_memory(Arc::new(TfIdfFallback::new(128))).unwrap())
}

#[test]
fn seeding_twice_inserts_once() {
    let store = store();
    let seeder = Seeder::new(Arc::clone(&store));
    let set = builtin_seed_set().unwrap();

    let first = seeder.seed(&set).unwrap();
    assert_eq!(first.inserted, 25);
    assert!(!first.skipped_by_marker);
    assert_eq!(store.count().unwrap(), 25);

    let second = seeder.seed(&set).unwrap();
    assert!(second.skipped_by_marker);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.seed_version, first.seed_version);
    assert_eq!(store.count().unwrap(), 25);
}

#[test]
fn partially_populated_store_is_topped_up() {
    let store = store();
    let set = builtin_seed_set().unwrap();
    for example in &set.examples()[..5] {
        store.add(example).unwrap();
    }
    // An interaction with the same text but different labels is not a seed row.
    store
        .add(
            &NewExample::new(
                set.examples()[6].text(),
                "Joyful",
                "Public Relations",
                ExampleSource::Interaction,
            )
            .unwrap(),
        )
        .unwrap();

    let report = Seeder::new(Arc::clone(&store)).seed(&set).unwrap();
    assert_eq!(report.already_present, 5);
    assert_eq!(report.inserted, 20);
    assert_eq!(store.count().unwrap(), 26);
}

#[test]
fn different_seed_set_runs_again() {
    let store = store();
    let seeder = Seeder::new(Arc::clone(&store));
    let full = builtin_seed_set().unwrap();
    let small = SeedSet::new(full.examples()[..3].to_vec());

    seeder.seed(&small).unwrap();
    let report = seeder.seed(&full).unwrap();
    assert!(!report.skipped_by_marker);
    assert_eq!(report.already_present, 3);
    assert_eq!(report.inserted, 22);
}

#[test]
fn seeded_examples_keep_table_order() {
    let store = store();
    let set = builtin_seed_set().unwrap();
    Seeder::new(Arc::clone(&store)).seed(&set).unwrap();

    let first = store.get(1).unwrap().unwrap();
    assert_eq!(first.text, set.examples()[0].text());
    assert_eq!(first.source, ExampleSource::Seed);
}

#[test]
fn seed_tables_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let mood = dir.path().join("mood.json");
    let department = dir.path().join("department.json");
    std::fs::write(
        &mood,
        r#"[{"text": "My suit is damaged", "label": "Frustrated"},
            {"text": "We saved the city", "label": "Joyful"}]"#,
    )
    .unwrap();
    std::fs::write(
        &department,
        r#"[{"text": "My suit is damaged", "label": "Equipment Maintenance"},
            {"text": "We saved the city", "label": "Public Relations"}]"#,
    )
    .unwrap();

    let config = SeedConfig {
        enabled: true,
        mood_path: Some(mood.display().to_string()),
        department_path: Some(department.display().to_string()),
    };
    let set = load_seed_set(&config).unwrap();
    assert_eq!(set.len(), 2);

    let store = store();
    let report = Seeder::new(Arc::clone(&store)).seed(&set).unwrap();
    assert_eq!(report.inserted, 2);
    let hits = store.query_similar("My suit is damaged", 1).unwrap();
    assert_eq!(hits[0].0.department_label, "Equipment Maintenance");
}

#[test]
fn missing_seed_file_is_an_error() {
    let config = SeedConfig {
        enabled: true,
        mood_path: Some("/nonexistent/mood.json".to_string()),
        department_path: Some("/nonexistent/department.json".to_string()),
    };
    assert!(load_seed_set(&config).is_err());
}
