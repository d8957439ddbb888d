//! Example seeder.
//!
//! A persisted marker keyed by the seed set's fingerprint makes a repeat run
//! a no-op. Without a marker, each triple is checked by content hash so a
//! store populated by other means is topped up rather than duplicated.

use std::sync::Arc;

use triage_core::errors::TriageResult;
use triage_core::traits::IExampleStore;
use triage_core::SeedReport;
use tracing::{debug, info};

use crate::seed::SeedSet;

pub struct Seeder {
    store: Arc<dyn IExampleStore>,
}

impl Seeder {
    pub fn new(store: Arc<dyn IExampleStore>) -> Self {
        Self { store }
    }

    /// Insert every seed triple not already stored, in the set's order.
    pub fn seed(&self, set: &SeedSet) -> TriageResult<SeedReport> {
        let version = set.version();
        let mut report = SeedReport {
            seed_version: version.clone(),
            ..Default::default()
        };

        if let Some(applied_at) = self.store.seed_marker(&version)? {
            debug!(%version, %applied_at, "seed set already applied");
            report.skipped_by_marker = true;
            return Ok(report);
        }

        for example in set.examples() {
            if self.store.contains_hash(&example.content_hash())? {
                report.already_present += 1;
                continue;
            }
            self.store.add(example)?;
            report.inserted += 1;
        }

        self.store.record_seed_marker(&version, set.len())?;
        info!(
            %version,
            inserted = report.inserted,
            already_present = report.already_present,
            "seeding complete"
        );
        Ok(report)
    }
}
