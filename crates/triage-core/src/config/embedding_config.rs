use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "cohere" or "tfidf".
    pub provider: String,
    /// Remote model name.
    pub model: String,
    /// Base URL of the embedding API.
    pub endpoint: String,
    /// Embedding dimensions. Remote vectors are padded or cut to this size.
    pub dimensions: usize,
    /// L1 in-memory cache max entries.
    pub l1_cache_size: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Retries after the first failed request.
    pub max_retries: u32,
    /// Examples re-embedded per batch after a model change.
    pub reindex_batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_COHERE_ENDPOINT.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            reindex_batch_size: defaults::DEFAULT_REINDEX_BATCH_SIZE,
        }
    }
}
