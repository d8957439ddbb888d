//! EmbeddingEngine, the entry point for triage-embeddings.
//!
//! Owns the single configured provider and the L1 cache. Implements
//! `IEmbeddingProvider` so the store can take it directly.

use triage_core::config::EmbeddingConfig;
use triage_core::errors::{EmbeddingError, TriageResult};
use triage_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::L1MemoryCache;
use crate::providers;

pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: L1MemoryCache,
}

impl EmbeddingEngine {
    /// Build from configuration. `api_key` is only consulted for remote providers.
    pub fn new(config: &EmbeddingConfig, api_key: Option<&str>) -> TriageResult<Self> {
        let provider = providers::create_provider(config, api_key)?;
        Ok(Self::with_provider(provider, config.l1_cache_size))
    }

    /// Wrap an already-constructed provider.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, cache_size: u64) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache: L1MemoryCache::new(cache_size),
        }
    }

    pub fn cache_len(&self) -> u64 {
        self.cache.entry_count()
    }

    fn cache_key(&self, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.provider.name().as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    fn validate(&self, embedding: &[f32]) -> TriageResult<()> {
        let expected = self.provider.dimensions();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> TriageResult<Vec<f32>> {
        let key = self.cache_key(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!("embedding cache hit");
            return Ok(hit);
        }

        let embedding = self.provider.embed(text)?;
        self.validate(&embedding)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    /// Cached texts are served from L1; only misses go to the provider, in one call.
    fn embed_batch(&self, texts: &[String]) -> TriageResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| self.cache_key(t)).collect();
        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();

        let missing: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();
        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let fresh = self.provider.embed_batch(&batch)?;
            if fresh.len() != batch.len() {
                return Err(EmbeddingError::EmptyResponse {
                    provider: self.provider.name().to_string(),
                }
                .into());
            }
            for (&i, embedding) in missing.iter().zip(fresh) {
                self.validate(&embedding)?;
                self.cache.insert(keys[i].clone(), embedding.clone());
                out[i] = Some(embedding);
            }
        }

        Ok(out.into_iter().flatten().collect())
    }

    fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
