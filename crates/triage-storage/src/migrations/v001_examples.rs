//! v001: examples table.
//!
//! `id` is AUTOINCREMENT so ids are never reused and always increase,
//! whatever other processes write to the same file.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS examples (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            text              TEXT NOT NULL CHECK (length(trim(text)) > 0),
            mood_label        TEXT NOT NULL CHECK (length(mood_label) > 0),
            department_label  TEXT NOT NULL CHECK (length(department_label) > 0),
            content_hash      TEXT NOT NULL,
            source            TEXT NOT NULL,
            created_at        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_examples_content_hash ON examples(content_hash);
        ",
    )
}
