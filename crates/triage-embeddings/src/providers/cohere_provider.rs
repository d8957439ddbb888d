//! Cohere embed API provider.
//!
//! Blocking HTTP client with retry and exponential backoff. The store calls
//! providers from blocking threads, so the sync client is used directly.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use triage_core::config::EmbeddingConfig;
use triage_core::errors::{EmbeddingError, TriageResult};
use triage_core::traits::IEmbeddingProvider;

const EMBED_PATH: &str = "/v1/embed";
const INPUT_TYPE: &str = "classification";

pub struct CohereEmbedProvider {
    client: Client,
    api_key: String,
    url: String,
    model: String,
    name: String,
    dimensions: usize,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: &'a str,
    truncate: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

impl CohereEmbedProvider {
    pub fn new(config: &EmbeddingConfig, api_key: String) -> TriageResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("http client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            url: format!("{}{EMBED_PATH}", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            name: format!("cohere/{}", config.model),
            dimensions: config.dimensions,
            max_retries: config.max_retries,
        })
    }

    fn request_embeddings(&self, texts: &[String]) -> TriageResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(Duration::from_millis(200 * 2u64.pow(attempt - 1)));
                debug!(attempt, "retrying cohere embed request");
            }

            match self.send(texts) {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    warn!(attempt, error = %e, "cohere embed request failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .unwrap_or(EmbeddingError::ProviderUnavailable {
                provider: self.name.clone(),
            })
            .into())
    }

    fn send(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let body = EmbedRequest {
            model: &self.model,
            texts,
            input_type: INPUT_TYPE,
            truncate: "END",
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("http: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("cohere returned {status}: {detail}"),
            });
        }

        let parsed: EmbedResponse =
            response.json().map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("response body: {e}"),
            })?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingError::EmptyResponse {
                provider: self.name.clone(),
            });
        }

        Ok(parsed
            .embeddings
            .into_iter()
            .map(|mut v| {
                v.resize(self.dimensions, 0.0);
                v
            })
            .collect())
    }
}

impl IEmbeddingProvider for CohereEmbedProvider {
    fn embed(&self, text: &str) -> TriageResult<Vec<f32>> {
        self.request_embeddings(&[text.to_string()])?
            .pop()
            .ok_or_else(|| {
                EmbeddingError::EmptyResponse {
                    provider: self.name.clone(),
                }
                .into()
            })
    }

    fn embed_batch(&self, texts: &[String]) -> TriageResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}
