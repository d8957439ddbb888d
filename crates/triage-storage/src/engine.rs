//! ExampleStore: owns the connection pool and the embedding provider,
//! implements `IExampleStore`.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, info, warn};

use triage_core::config::StorageConfig;
use triage_core::errors::{EmbeddingError, TriageResult};
use triage_core::traits::{IEmbeddingProvider, IExampleStore, ScoredExample};
use triage_core::{Example, NewExample};

use crate::pool::ConnectionPool;
use crate::queries::{example_crud, seed_ops, vector_search};
use crate::{migrations, recovery, to_storage_err};

/// Outcome of a re-index pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReindexReport {
    pub reembedded: usize,
    pub batches: usize,
}

/// SQLite-backed example store.
///
/// Every example row has exactly one embedding row, written in the same
/// savepoint. Embeddings are computed before the write lock is taken.
pub struct ExampleStore {
    pool: ConnectionPool,
    embedder: Arc<dyn IEmbeddingProvider>,
}

impl ExampleStore {
    /// Open (or create) a store backed by a file on disk.
    pub fn open(
        path: &Path,
        config: &StorageConfig,
        embedder: Arc<dyn IEmbeddingProvider>,
    ) -> TriageResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let store = Self { pool, embedder };
        store.initialize()?;
        info!(
            path = %path.display(),
            embedder = store.embedder.name(),
            "example store opened"
        );
        Ok(store)
    }

    /// Open an in-memory store. All reads go through the writer.
    pub fn open_in_memory(embedder: Arc<dyn IEmbeddingProvider>) -> TriageResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let store = Self { pool, embedder };
        store.initialize()?;
        Ok(store)
    }

    /// Run migrations and integrity checks.
    fn initialize(&self) -> TriageResult<()> {
        self.pool.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            recovery::check_integrity(conn)
        })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Name of the embedding model new vectors are produced with.
    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> TriageResult<T>
    where
        F: FnOnce(&Connection) -> TriageResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    /// Embed `text` and check the vector has the provider's dimension.
    fn embed_checked(&self, text: &str) -> TriageResult<Vec<f32>> {
        let embedding = self.embedder.embed(text)?;
        check_dimensions(&embedding, self.embedder.dimensions())?;
        Ok(embedding)
    }

    /// All stored examples in insertion order.
    pub fn list(&self) -> TriageResult<Vec<Example>> {
        self.with_reader(example_crud::list_examples)
    }

    /// Re-embed examples whose stored vector came from a different model or
    /// dimension than the current provider, `batch_size` at a time.
    pub fn reindex_stale(&self, batch_size: usize) -> TriageResult<ReindexReport> {
        let model = self.embedder.name().to_string();
        let dims = self.embedder.dimensions();
        let batch_size = batch_size.max(1);
        let mut report = ReindexReport::default();

        loop {
            let batch = self.pool.writer.with_conn(|conn| {
                vector_search::stale_embeddings(conn, &model, dims, batch_size)
            })?;
            if batch.is_empty() {
                break;
            }

            let embeddings = self.embed_batch_with_fallback(&batch)?;
            self.pool.writer.with_conn(|conn| {
                with_savepoint(conn, "reindex_batch", |conn| {
                    for ((id, _), embedding) in batch.iter().zip(&embeddings) {
                        vector_search::store_embedding(conn, *id, embedding, &model)?;
                    }
                    Ok(())
                })
            })?;

            report.reembedded += batch.len();
            report.batches += 1;
            debug!(batch = report.batches, size = batch.len(), "re-embedded batch");
        }

        if report.reembedded > 0 {
            info!(
                reembedded = report.reembedded,
                batches = report.batches,
                model = %model,
                "re-indexed stale embeddings"
            );
        }
        Ok(report)
    }

    /// Batch embed; on batch failure fall back to one request per text.
    fn embed_batch_with_fallback(&self, batch: &[(i64, String)]) -> TriageResult<Vec<Vec<f32>>> {
        let texts: Vec<String> = batch.iter().map(|(_, text)| text.clone()).collect();
        let dims = self.embedder.dimensions();

        match self.embedder.embed_batch(&texts) {
            Ok(embeddings)
                if embeddings.len() == texts.len()
                    && embeddings.iter().all(|e| e.len() == dims) =>
            {
                Ok(embeddings)
            }
            Ok(embeddings) => {
                warn!(
                    expected = texts.len(),
                    got = embeddings.len(),
                    "batch embedding returned unusable vectors, falling back to individual"
                );
                texts.iter().map(|t| self.embed_checked(t)).collect()
            }
            Err(e) => {
                warn!(error = %e, "batch embedding failed, falling back to individual");
                texts.iter().map(|t| self.embed_checked(t)).collect()
            }
        }
    }
}

impl IExampleStore for ExampleStore {
    fn add(&self, example: &NewExample) -> TriageResult<Example> {
        let embedding = self.embed_checked(example.text())?;
        let model = self.embedder.name();

        let stored = self.pool.writer.with_conn(|conn| {
            with_savepoint(conn, "add_example", |conn| {
                let stored = example_crud::insert_example(conn, example)?;
                vector_search::store_embedding(conn, stored.id, &embedding, model)?;
                Ok(stored)
            })
        })?;

        debug!(
            id = stored.id,
            source = stored.source.as_str(),
            mood = %stored.mood_label,
            department = %stored.department_label,
            "example added"
        );
        Ok(stored)
    }

    fn query_similar(&self, text: &str, k: usize) -> TriageResult<Vec<ScoredExample>> {
        if k == 0 {
            return Ok(vec![]);
        }
        let query = self.embed_checked(text)?;
        let model = self.embedder.name();
        let results =
            self.with_reader(|conn| vector_search::search_vector(conn, &query, model, k))?;
        debug!(k, returned = results.len(), "similarity query");
        Ok(results)
    }

    fn count(&self) -> TriageResult<usize> {
        self.with_reader(example_crud::count_examples)
    }

    fn get(&self, id: i64) -> TriageResult<Option<Example>> {
        self.with_reader(|conn| example_crud::get_example(conn, id))
    }

    fn contains_hash(&self, content_hash: &str) -> TriageResult<bool> {
        self.with_reader(|conn| example_crud::contains_hash(conn, content_hash))
    }

    fn seed_marker(&self, seed_version: &str) -> TriageResult<Option<DateTime<Utc>>> {
        self.with_reader(|conn| seed_ops::get_marker(conn, seed_version))
    }

    fn record_seed_marker(&self, seed_version: &str, example_count: usize) -> TriageResult<()> {
        self.pool
            .writer
            .with_conn(|conn| seed_ops::insert_marker(conn, seed_version, example_count))
    }
}

fn check_dimensions(embedding: &[f32], expected: usize) -> TriageResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}

/// Run `f` inside a named SAVEPOINT: all-or-nothing.
fn with_savepoint<T, F>(conn: &Connection, name: &str, f: F) -> TriageResult<T>
where
    F: FnOnce(&Connection) -> TriageResult<T>,
{
    conn.execute_batch(&format!("SAVEPOINT {name}"))
        .map_err(|e| to_storage_err(format!("{name} savepoint: {e}")))?;

    match f(conn) {
        Ok(value) => {
            conn.execute_batch(&format!("RELEASE {name}"))
                .map_err(|e| to_storage_err(format!("{name} release: {e}")))?;
            Ok(value)
        }
        Err(e) => {
            let _ = conn.execute_batch(&format!("ROLLBACK TO {name}"));
            let _ = conn.execute_batch(&format!("RELEASE {name}"));
            Err(e)
        }
    }
}
