//! Provider selection.
//!
//! The provider is chosen once. There is no runtime fallback between
//! providers: vectors from different models are not comparable.

pub mod cohere_provider;
pub mod tfidf_fallback;

pub use cohere_provider::CohereEmbedProvider;
pub use tfidf_fallback::TfIdfFallback;

use tracing::{info, warn};
use triage_core::config::EmbeddingConfig;
use triage_core::errors::TriageResult;
use triage_core::traits::IEmbeddingProvider;

/// Create the configured provider.
///
/// `cohere` without an API key degrades to TF-IDF with a warning.
pub fn create_provider(
    config: &EmbeddingConfig,
    api_key: Option<&str>,
) -> TriageResult<Box<dyn IEmbeddingProvider>> {
    match (config.provider.as_str(), api_key) {
        ("cohere", Some(key)) if !key.trim().is_empty() => {
            info!(provider = "cohere", model = %config.model, "embedding provider selected");
            Ok(Box::new(CohereEmbedProvider::new(config, key.to_string())?))
        }
        ("cohere", _) => {
            warn!("cohere embeddings configured but COHERE_KEY is not set; using TF-IDF");
            Ok(Box::new(TfIdfFallback::new(config.dimensions)))
        }
        ("tfidf", _) => {
            info!(provider = "tfidf", "embedding provider selected");
            Ok(Box::new(TfIdfFallback::new(config.dimensions)))
        }
        (other, _) => {
            warn!(provider = other, "unknown embedding provider; using TF-IDF");
            Ok(Box::new(TfIdfFallback::new(config.dimensions)))
        }
    }
}
