//! Integrity checks.

use rusqlite::Connection;

use triage_core::errors::TriageResult;

use crate::to_storage_err;

/// `PRAGMA quick_check`. Returns true if the database is healthy.
pub fn quick_check(conn: &Connection) -> TriageResult<bool> {
    let result: String = conn
        .query_row("PRAGMA quick_check", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(result == "ok")
}

/// Number of examples with no embedding row.
pub fn unindexed_count(conn: &Connection) -> TriageResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM examples e
             LEFT JOIN example_embeddings emb ON emb.example_id = e.id
             WHERE emb.example_id IS NULL",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}
