//! v003: seed markers, one row per fully applied seed-set version.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS seed_markers (
            seed_version   TEXT PRIMARY KEY,
            example_count  INTEGER NOT NULL,
            applied_at     TEXT NOT NULL
        );
        ",
    )
}
