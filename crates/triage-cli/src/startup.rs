//! Startup: open the store, re-embed stale vectors, seed, and wire the context.
//!
//! Runs before the async runtime exists, so blocking HTTP clients are
//! created and used on plain threads.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use triage_classifier::create_classifier;
use triage_core::traits::IExampleStore;
use triage_core::TriageConfig;
use triage_embeddings::EmbeddingEngine;
use triage_retrieval::{load_seed_set, Seeder};
use triage_session::TriageContext;
use triage_storage::ExampleStore;

const API_KEY_VAR: &str = "COHERE_KEY";

pub fn build_context(config: &TriageConfig) -> anyhow::Result<TriageContext> {
    let api_key = std::env::var(API_KEY_VAR).ok();

    let embedder = EmbeddingEngine::new(&config.embedding, api_key.as_deref())
        .context("failed to initialise embeddings")?;

    let store = ExampleStore::open(
        Path::new(&config.storage.db_path),
        &config.storage,
        Arc::new(embedder),
    )
    .with_context(|| format!("failed to open example store at {}", config.storage.db_path))?;

    let reindexed = store
        .reindex_stale(config.embedding.reindex_batch_size)
        .context("failed to re-embed stored examples")?;
    if reindexed.reembedded > 0 {
        info!(
            examples = reindexed.reembedded,
            batches = reindexed.batches,
            embedder = store.embedder_name(),
            "re-embedded examples for the active embedding model"
        );
    }

    let store: Arc<dyn IExampleStore> = Arc::new(store);

    if config.seed.enabled {
        let set = load_seed_set(&config.seed).context("failed to load seed set")?;
        let report = Seeder::new(Arc::clone(&store))
            .seed(&set)
            .context("seeding failed")?;
        info!(
            version = %report.seed_version,
            inserted = report.inserted,
            already_present = report.already_present,
            skipped = report.skipped_by_marker,
            "seed check done"
        );
    }
    info!(examples = store.count()?, "example store ready");

    let classifier = create_classifier(&config.classifier, api_key.as_deref())
        .context("failed to initialise classifier")?;

    Ok(TriageContext::new(store, classifier, config))
}
