//! Versioned schema migrations, tracked in `PRAGMA user_version`.

mod v001_examples;
mod v002_embeddings;
mod v003_seed_markers;

use rusqlite::Connection;
use tracing::debug;

use triage_core::errors::{StorageError, TriageResult};

type Migration = fn(&Connection) -> rusqlite::Result<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_examples::migrate),
    (2, v002_embeddings::migrate),
    (3, v003_seed_markers::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 3;

/// Apply every migration newer than the database's current version.
/// Each one runs in its own transaction together with the version bump.
pub fn run_migrations(conn: &Connection) -> TriageResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::MigrationFailed {
            version: 0,
            reason: e.to_string(),
        })?;

    if current > LATEST_VERSION {
        return Err(StorageError::MigrationFailed {
            version: current,
            reason: format!("database is newer than this build (latest known {LATEST_VERSION})"),
        }
        .into());
    }

    for (version, migrate) in MIGRATIONS {
        if current >= *version {
            continue;
        }
        let failed = |e: rusqlite::Error| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        };
        conn.execute_batch("BEGIN IMMEDIATE").map_err(failed)?;
        let applied = migrate(conn).and_then(|()| conn.pragma_update(None, "user_version", version));
        match applied {
            Ok(()) => conn.execute_batch("COMMIT").map_err(failed)?,
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(failed(e).into());
            }
        }
        debug!(version, "applied migration");
    }
    Ok(())
}

/// Current schema version of a connection's database.
pub fn schema_version(conn: &Connection) -> TriageResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| crate::to_storage_err(e.to_string()))
}
