//! Startup integrity checks, to detect corruption early.

use rusqlite::Connection;
use tracing::warn;

use triage_core::errors::{StorageError, TriageResult};

use crate::queries::maintenance;

/// Fail on a corrupt database file; warn when examples lack an embedding
/// row (the re-index pass repairs those).
pub fn check_integrity(conn: &Connection) -> TriageResult<()> {
    if !maintenance::quick_check(conn)? {
        return Err(StorageError::CorruptionDetected {
            details: "PRAGMA quick_check did not return ok".to_string(),
        }
        .into());
    }
    let unindexed = maintenance::unindexed_count(conn)?;
    if unindexed > 0 {
        warn!(unindexed, "examples without an embedding row");
    }
    Ok(())
}
