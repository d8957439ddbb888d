use serde::{Deserialize, Serialize};

/// What a seeding run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Seed version fingerprint the run was checked against.
    pub seed_version: String,
    /// Examples added by this run.
    pub inserted: usize,
    /// Seed triples skipped because the same content was already stored.
    pub already_present: usize,
    /// True when a marker for this seed version existed and nothing ran.
    pub skipped_by_marker: bool,
}
