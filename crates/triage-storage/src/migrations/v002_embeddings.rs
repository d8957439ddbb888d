//! v002: one embedding row per example, removed with its example.

use rusqlite::Connection;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS example_embeddings (
            example_id  INTEGER PRIMARY KEY,
            embedding   BLOB NOT NULL,
            dimensions  INTEGER NOT NULL,
            model_name  TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            FOREIGN KEY (example_id) REFERENCES examples(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_embeddings_model ON example_embeddings(model_name);
        ",
    )
}
