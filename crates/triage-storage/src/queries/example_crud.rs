//! Insert, get, count, and content-hash lookup for examples.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use triage_core::errors::{StorageError, TriageResult};
use triage_core::{Example, ExampleSource, NewExample};

use crate::to_storage_err;

/// Columns selected by every example query, in `RawExample` order.
pub(crate) const EXAMPLE_COLUMNS: &str =
    "e.id, e.text, e.mood_label, e.department_label, e.content_hash, e.source, e.created_at";

/// Example row as SQLite hands it back, before enum/timestamp parsing.
pub(crate) struct RawExample {
    id: i64,
    text: String,
    mood_label: String,
    department_label: String,
    content_hash: String,
    source: String,
    created_at: String,
}

impl RawExample {
    /// Read the first seven columns of `row`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            mood_label: row.get(2)?,
            department_label: row.get(3)?,
            content_hash: row.get(4)?,
            source: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    pub(crate) fn into_example(self) -> TriageResult<Example> {
        let source =
            ExampleSource::parse(&self.source).ok_or_else(|| StorageError::CorruptionDetected {
                details: format!("example {}: unknown source {:?}", self.id, self.source),
            })?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StorageError::CorruptionDetected {
                details: format!("example {}: bad created_at: {e}", self.id),
            })?
            .with_timezone(&Utc);
        Ok(Example {
            id: self.id,
            text: self.text,
            mood_label: self.mood_label,
            department_label: self.department_label,
            content_hash: self.content_hash,
            source,
            created_at,
        })
    }
}

/// Insert the example row and return it with its assigned id.
/// The caller owns the surrounding transaction.
pub fn insert_example(conn: &Connection, example: &NewExample) -> TriageResult<Example> {
    let created_at = Utc::now();
    let content_hash = example.content_hash();
    conn.execute(
        "INSERT INTO examples (text, mood_label, department_label, content_hash, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            example.text(),
            example.mood_label(),
            example.department_label(),
            content_hash,
            example.source().as_str(),
            created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(Example {
        id: conn.last_insert_rowid(),
        text: example.text().to_string(),
        mood_label: example.mood_label().to_string(),
        department_label: example.department_label().to_string(),
        content_hash,
        source: example.source(),
        created_at,
    })
}

pub fn get_example(conn: &Connection, id: i64) -> TriageResult<Option<Example>> {
    let raw = conn
        .query_row(
            &format!("SELECT {EXAMPLE_COLUMNS} FROM examples e WHERE e.id = ?1"),
            params![id],
            RawExample::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawExample::into_example).transpose()
}

pub fn count_examples(conn: &Connection) -> TriageResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM examples", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

pub fn contains_hash(conn: &Connection, content_hash: &str) -> TriageResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM examples WHERE content_hash = ?1)",
        params![content_hash],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// All examples in insertion order.
pub fn list_examples(conn: &Connection) -> TriageResult<Vec<Example>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {EXAMPLE_COLUMNS} FROM examples e ORDER BY e.id"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], RawExample::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut examples = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        examples.push(raw.into_example()?);
    }
    Ok(examples)
}
