//! Retriever: top-k nearest stored examples for a query.

use std::sync::Arc;

use triage_core::config::RetrievalConfig;
use triage_core::errors::TriageResult;
use triage_core::traits::IExampleStore;
use triage_core::Example;
use tracing::debug;

/// Thin façade over [`IExampleStore::query_similar`] with a default `k`.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn IExampleStore>,
    default_k: usize,
}

impl Retriever {
    pub fn new(store: Arc<dyn IExampleStore>, config: &RetrievalConfig) -> Self {
        Self {
            store,
            default_k: config.top_k,
        }
    }

    pub fn default_k(&self) -> usize {
        self.default_k
    }

    /// Up to `k` examples, most similar first. Empty store gives an empty list.
    pub fn retrieve(&self, query_text: &str, k: usize) -> TriageResult<Vec<Example>> {
        let scored = self.store.query_similar(query_text, k)?;
        debug!(
            k,
            returned = scored.len(),
            best = scored.first().map(|(_, s)| *s),
            "retrieved context"
        );
        Ok(scored.into_iter().map(|(example, _)| example).collect())
    }

    /// [`retrieve`](Self::retrieve) with the configured `k`.
    pub fn retrieve_default(&self, query_text: &str) -> TriageResult<Vec<Example>> {
        self.retrieve(query_text, self.default_k)
    }
}
