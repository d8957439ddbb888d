//! Session loop end to end, with a real in-memory store and stub classifiers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use triage_core::errors::{ClassificationError, StorageError, TriageResult};
use triage_core::traits::{IExampleStore, IFewShotClassifier, ScoredExample};
use triage_core::{
    ClassificationResult, Example, ExampleSource, LabeledText, Mood, NewExample, Prediction,
    TriageConfig, TriageError,
};
use triage_embeddings::TfIdfFallback;
use triage_session::{Presenter, Session, SessionState, SessionSummary, TriageContext};
use triage_storage::ExampleStore;

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

/// Returns fixed answers; mood calls are recognised by mood-valued labels.
/// Inputs containing "explode" fail.
struct FixedClassifier {
    mood: String,
    department: String,
    calls: AtomicUsize,
}

impl FixedClassifier {
    fn new(mood: &str, department: &str) -> Arc<Self> {
        Arc::new(Self {
            mood: mood.to_string(),
            department: department.to_string(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl IFewShotClassifier for FixedClassifier {
    async fn classify(&self, input: &str, examples: &[LabeledText]) -> TriageResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if input.contains("explode") {
            return Err(ClassificationError::RequestFailed {
                provider: "fixed".to_string(),
                reason: "model unavailable".to_string(),
            }
            .into());
        }
        if examples.iter().all(|e| e.label.parse::<Mood>().is_ok()) {
            Ok(self.mood.clone())
        } else {
            Ok(self.department.clone())
        }
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Delegates to a real store and counts every call.
struct CountingStore {
    inner: ExampleStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl IExampleStore for CountingStore {
    fn add(&self, example: &NewExample) -> TriageResult<Example> {
        self.touch();
        self.inner.add(example)
    }

    fn query_similar(&self, text: &str, k: usize) -> TriageResult<Vec<ScoredExample>> {
        self.touch();
        self.inner.query_similar(text, k)
    }

    fn count(&self) -> TriageResult<usize> {
        self.touch();
        self.inner.count()
    }

    fn get(&self, id: i64) -> TriageResult<Option<Example>> {
        self.touch();
        self.inner.get(id)
    }

    fn contains_hash(&self, content_hash: &str) -> TriageResult<bool> {
        self.touch();
        self.inner.contains_hash(content_hash)
    }

    fn seed_marker(&self, seed_version: &str) -> TriageResult<Option<DateTime<Utc>>> {
        self.touch();
        self.inner.seed_marker(seed_version)
    }

    fn record_seed_marker(&self, seed_version: &str, example_count: usize) -> TriageResult<()> {
        self.touch();
        self.inner.record_seed_marker(seed_version, example_count)
    }
}

/// A store whose similarity search is down for queries mentioning "outage".
struct OutageStore {
    inner: ExampleStore,
}

impl IExampleStore for OutageStore {
    fn add(&self, example: &NewExample) -> TriageResult<Example> {
        self.inner.add(example)
    }

    fn query_similar(&self, text: &str, k: usize) -> TriageResult<Vec<ScoredExample>> {
        if text.contains("outage") {
            return Err(StorageError::SqliteError {
                message: "database is locked".to_string(),
            }
            .into());
        }
        self.inner.query_similar(text, k)
    }

    fn count(&self) -> TriageResult<usize> {
        self.inner.count()
    }

    fn get(&self, id: i64) -> TriageResult<Option<Example>> {
        self.inner.get(id)
    }

    fn contains_hash(&self, content_hash: &str) -> TriageResult<bool> {
        self.inner.contains_hash(content_hash)
    }

    fn seed_marker(&self, seed_version: &str) -> TriageResult<Option<DateTime<Utc>>> {
        self.inner.seed_marker(seed_version)
    }

    fn record_seed_marker(&self, seed_version: &str, example_count: usize) -> TriageResult<()> {
        self.inner.record_seed_marker(seed_version, example_count)
    }
}

#[derive(Default, Clone)]
struct Recorded {
    reports: Vec<ClassificationResult>,
    failures: Vec<(String, String)>,
    prompts: usize,
    welcomed: bool,
    farewelled: bool,
}

#[derive(Default)]
struct RecordingPresenter {
    log: Arc<Mutex<Recorded>>,
}

impl Presenter for RecordingPresenter {
    fn welcome(&mut self, _quit_keyword: &str) -> std::io::Result<()> {
        self.log.lock().unwrap().welcomed = true;
        Ok(())
    }

    fn prompt(&mut self, _prompt: &str) -> std::io::Result<()> {
        self.log.lock().unwrap().prompts += 1;
        Ok(())
    }

    fn report(&mut self, result: &ClassificationResult) -> std::io::Result<()> {
        self.log.lock().unwrap().reports.push(result.clone());
        Ok(())
    }

    fn report_failure(&mut self, query: &str, error: &TriageError) -> std::io::Result<()> {
        self.log
            .lock()
            .unwrap()
            .failures
            .push((query.to_string(), error.kind().to_string()));
        Ok(())
    }

    fn farewell(&mut self) -> std::io::Result<()> {
        self.log.lock().unwrap().farewelled = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn counting_store() -> Arc<CountingStore> {
    Arc::new(CountingStore {
        inner: ExampleStore::open_in_memory(Arc::new(TfIdfFallback::new(256))).unwrap(),
        calls: AtomicUsize::new(0),
    })
}

fn config(top_k: usize) -> TriageConfig {
    let mut config = TriageConfig::default();
    config.retrieval.top_k = top_k;
    config
}

fn suit_example() -> NewExample {
    NewExample::new(
        "My suit is damaged",
        "Frustrated",
        "Equipment Maintenance",
        ExampleSource::Seed,
    )
    .unwrap()
}

async fn run(ctx: &TriageContext, input: &str) -> (SessionSummary, Recorded) {
    run_bytes(ctx, input.as_bytes()).await
}

async fn run_bytes(ctx: &TriageContext, input: &[u8]) -> (SessionSummary, Recorded) {
    let presenter = RecordingPresenter::default();
    let log = Arc::clone(&presenter.log);
    let mut session = Session::new(ctx, presenter);
    let summary = session.run(input).await.unwrap();
    assert_eq!(session.state(), &SessionState::Ended);
    let recorded = log.lock().unwrap().clone();
    (summary, recorded)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn end_to_end_turn_grows_the_store() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let classifier = FixedClassifier::new("Frustrated", "Equipment Maintenance");
    let ctx = TriageContext::new(store.clone(), classifier.clone(), &config(1));

    let retrieved = ctx.retriever.retrieve_default("My suit is damaged").unwrap();
    assert_eq!(retrieved.len(), 1);
    assert_eq!(retrieved[0].text, "My suit is damaged");

    let (summary, recorded) = run(&ctx, "My suit is damaged\nquit\n").await;

    assert_eq!(
        summary,
        SessionSummary {
            turns: 1,
            persisted: 1,
            failed: 0
        }
    );
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 2);

    let report = &recorded.reports[0];
    assert_eq!(report.query_text, "My suit is damaged");
    assert_eq!(report.mood, Prediction::Label("Frustrated".to_string()));
    assert_eq!(
        report.department,
        Prediction::Label("Equipment Maintenance".to_string())
    );
    assert_eq!(report.priority, Some(3));

    assert_eq!(store.count().unwrap(), 2);
    let hits = store.query_similar("My suit is damaged", 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].0.source, ExampleSource::Seed);
    assert_eq!(hits[1].0.source, ExampleSource::Interaction);
    assert!(hits.iter().all(|(e, _)| e.mood_label == "Frustrated"));
}

#[tokio::test]
async fn quit_in_any_case_touches_nothing() {
    for quit in ["quit", "QUIT", "QuIt"] {
        let store = counting_store();
        let classifier = FixedClassifier::new("Neutral", "Legal");
        let ctx = TriageContext::new(store.clone(), classifier.clone(), &config(90));

        let (summary, recorded) = run(&ctx, &format!("{quit}\nthis is never read\n")).await;

        assert_eq!(summary, SessionSummary::default());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
        assert!(recorded.welcomed && recorded.farewelled);
        assert!(recorded.reports.is_empty());
    }
}

#[tokio::test]
async fn custom_quit_keyword() {
    let store = counting_store();
    let mut config = config(90);
    config.session.quit_keyword = "bye".to_string();
    let ctx = TriageContext::new(store.clone(), FixedClassifier::new("Neutral", "Legal"), &config);

    let (summary, recorded) = run(&ctx, "BYE\n").await;
    assert_eq!(summary.turns, 0);
    assert_eq!(recorded.prompts, 1);
}

#[tokio::test]
async fn classifier_failure_leaves_store_unchanged() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("Anxious", "Emergency Response"),
        &config(5),
    );

    let (summary, recorded) = run(&ctx, "the reactor will explode\nquit\n").await;

    assert_eq!(summary.turns, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.persisted, 0);
    assert_eq!(store.count().unwrap(), 1);
    assert!(recorded.reports.is_empty());
    assert_eq!(recorded.failures.len(), 1);
    assert_eq!(recorded.failures[0].1, "classification_error");
}

#[tokio::test]
async fn loop_continues_after_failed_turn() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("Anxious", "Emergency Response"),
        &config(5),
    );

    let (summary, recorded) = run(&ctx, "it will explode\nportal opened downtown\nquit\n").await;

    assert_eq!(summary.turns, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.persisted, 1);
    assert_eq!(recorded.reports.len(), 1);
    assert_eq!(store.count().unwrap(), 2);
}

#[tokio::test]
async fn empty_store_reports_unclassified_without_persisting() {
    let store = counting_store();
    let classifier = FixedClassifier::new("Neutral", "Legal");
    let ctx = TriageContext::new(store.clone(), classifier.clone(), &config(90));

    let (summary, recorded) = run(&ctx, "hello there\nquit\n").await;

    assert_eq!(summary.turns, 1);
    assert_eq!(summary.persisted, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(recorded.reports[0].mood, Prediction::Unclassified);
    assert_eq!(recorded.reports[0].priority, None);
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn unknown_mood_reported_without_priority() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("Hangry", "Equipment Maintenance"),
        &config(5),
    );

    let (summary, recorded) = run(&ctx, "my boots squeak\nquit\n").await;

    assert_eq!(summary.persisted, 0);
    assert_eq!(summary.failed, 0);
    let report = &recorded.reports[0];
    assert_eq!(report.mood, Prediction::Label("Hangry".to_string()));
    assert_eq!(report.priority, None);
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn end_of_input_ends_session() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("Joyful", "Public Relations"),
        &config(5),
    );

    let (summary, recorded) = run(&ctx, "we saved the parade").await;

    assert_eq!(summary.turns, 1);
    assert_eq!(summary.persisted, 1);
    assert!(recorded.farewelled);
}

#[tokio::test]
async fn blank_lines_are_skipped() {
    let store = counting_store();
    let classifier = FixedClassifier::new("Neutral", "Legal");
    let ctx = TriageContext::new(store.clone(), classifier, &config(5));

    let (summary, recorded) = run(&ctx, "\n   \r\n\nquit\n").await;

    assert_eq!(summary.turns, 0);
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    assert_eq!(recorded.prompts, 4);
}

#[tokio::test]
async fn each_turn_learns_from_the_last() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("Irritated", "Equipment Maintenance"),
        &config(90),
    );

    let (summary, _) = run(&ctx, "gadget jammed\ngadget jammed again\nquit\n").await;

    assert_eq!(summary.persisted, 2);
    assert_eq!(store.count().unwrap(), 3);
    let top = store.query_similar("gadget jammed", 1).unwrap();
    assert_eq!(top[0].0.text, "gadget jammed");
    assert_eq!(top[0].0.source, ExampleSource::Interaction);
}

#[tokio::test]
async fn store_failure_during_retrieval_is_a_failed_turn() {
    let store = Arc::new(OutageStore {
        inner: ExampleStore::open_in_memory(Arc::new(TfIdfFallback::new(256))).unwrap(),
    });
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("Anxious", "Emergency Response"),
        &config(5),
    );

    let (summary, recorded) =
        run(&ctx, "power outage at the lair\nportal opened downtown\nquit\n").await;

    assert_eq!(summary.turns, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.persisted, 1);
    assert_eq!(recorded.failures.len(), 1);
    assert_eq!(recorded.failures[0].0, "power outage at the lair");
    assert_eq!(recorded.failures[0].1, "store_unavailable");
    assert_eq!(recorded.reports.len(), 1);
    assert_eq!(recorded.reports[0].query_text, "portal opened downtown");
    assert_eq!(store.count().unwrap(), 2);
}

#[tokio::test]
async fn invalid_utf8_line_does_not_end_session() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("Neutral", "Public Relations"),
        &config(5),
    );

    let (summary, recorded) = run_bytes(&ctx, b"caf\xe9 is closed\nquit\n").await;

    assert_eq!(
        summary,
        SessionSummary {
            turns: 1,
            persisted: 1,
            failed: 0
        }
    );
    assert_eq!(recorded.reports[0].query_text, "caf\u{fffd} is closed");
    assert!(recorded.farewelled);
}

#[tokio::test]
async fn lowercase_mood_prediction_persisted_canonically() {
    let store = counting_store();
    store.add(&suit_example()).unwrap();
    let ctx = TriageContext::new(
        store.clone(),
        FixedClassifier::new("frustrated", "Equipment Maintenance"),
        &config(5),
    );

    let (summary, recorded) = run(&ctx, "my cape ripped\nquit\n").await;

    assert_eq!(summary.persisted, 1);
    assert_eq!(recorded.reports[0].priority, Some(3));
    let hits = store.query_similar("my cape ripped", 1).unwrap();
    assert_eq!(hits[0].0.text, "my cape ripped");
    assert_eq!(hits[0].0.mood_label, "Frustrated");
}
