//! # triage-storage
//!
//! SQLite persistence for the example store: a single serialized writer,
//! a round-robin read pool, versioned migrations, and a brute-force cosine
//! index over stored embeddings.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod recovery;

pub use engine::{ExampleStore, ReindexReport};

use triage_core::errors::{StorageError, TriageError};

/// Wrap a SQLite failure message as a store-unavailable error.
pub(crate) fn to_storage_err(message: String) -> TriageError {
    TriageError::StoreUnavailable(StorageError::SqliteError { message })
}
