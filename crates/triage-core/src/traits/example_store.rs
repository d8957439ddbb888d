use chrono::{DateTime, Utc};

use crate::errors::TriageResult;
use crate::models::{Example, NewExample};

/// A stored example with its similarity to the query.
pub type ScoredExample = (Example, f64);

/// Append-only store of labeled examples with a similarity index over text.
pub trait IExampleStore: Send + Sync {
    /// Append one example and index it. The returned example carries the
    /// assigned id and is retrievable by the next `query_similar` call.
    fn add(&self, example: &NewExample) -> TriageResult<Example>;

    /// Up to `k` examples ordered by descending similarity to `text`.
    /// Ties go to the earlier insertion.
    fn query_similar(&self, text: &str, k: usize) -> TriageResult<Vec<ScoredExample>>;

    /// Number of stored examples.
    fn count(&self) -> TriageResult<usize>;

    /// Fetch one example by id.
    fn get(&self, id: i64) -> TriageResult<Option<Example>>;

    /// Whether an example with this content hash is already stored.
    fn contains_hash(&self, content_hash: &str) -> TriageResult<bool>;

    /// When the given seed version was applied, if ever.
    fn seed_marker(&self, seed_version: &str) -> TriageResult<Option<DateTime<Utc>>>;

    /// Record that a seed version has been fully applied.
    fn record_seed_marker(&self, seed_version: &str, example_count: usize) -> TriageResult<()>;
}
