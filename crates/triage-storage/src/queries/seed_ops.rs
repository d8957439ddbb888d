//! Seed marker rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use triage_core::errors::{StorageError, TriageError, TriageResult};

use crate::to_storage_err;

pub fn get_marker(conn: &Connection, seed_version: &str) -> TriageResult<Option<DateTime<Utc>>> {
    let applied_at: Option<String> = conn
        .query_row(
            "SELECT applied_at FROM seed_markers WHERE seed_version = ?1",
            params![seed_version],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    applied_at
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| {
                    TriageError::from(StorageError::CorruptionDetected {
                        details: format!("seed marker {seed_version}: bad applied_at: {e}"),
                    })
                })
        })
        .transpose()
}

pub fn insert_marker(conn: &Connection, seed_version: &str, example_count: usize) -> TriageResult<()> {
    conn.execute(
        "INSERT INTO seed_markers (seed_version, example_count, applied_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(seed_version) DO NOTHING",
        params![seed_version, example_count as i64, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
