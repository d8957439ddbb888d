//! Cohere few-shot classify API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use triage_core::config::ClassifierConfig;
use triage_core::errors::{ClassificationError, TriageResult};
use triage_core::traits::IFewShotClassifier;
use triage_core::LabeledText;

const CLASSIFY_PATH: &str = "/v1/classify";

pub struct CohereClassifier {
    client: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
    name: String,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    model: &'a str,
    inputs: [&'a str; 1],
    examples: &'a [LabeledText],
}

#[derive(Deserialize)]
struct ClassifyResponse {
    #[serde(default)]
    classifications: Vec<Classification>,
}

#[derive(Deserialize)]
struct Classification {
    #[serde(default)]
    prediction: Option<String>,
}

impl CohereClassifier {
    pub fn new(config: &ClassifierConfig, api_key: String) -> TriageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| ClassificationError::ProviderUnavailable {
                provider: format!("cohere ({e})"),
            })?;

        Ok(Self {
            client,
            api_key,
            url: format!("{}{CLASSIFY_PATH}", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            name: format!("cohere/{}", config.model),
        })
    }

    fn failed(&self, reason: impl std::fmt::Display) -> ClassificationError {
        ClassificationError::RequestFailed {
            provider: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> ClassificationError {
        ClassificationError::MalformedResponse {
            provider: self.name.clone(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl IFewShotClassifier for CohereClassifier {
    async fn classify(&self, input: &str, examples: &[LabeledText]) -> TriageResult<String> {
        let body = ClassifyRequest {
            model: &self.model,
            inputs: [input],
            examples,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.failed(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(self.failed(format!("status {status}: {detail}")).into());
        }

        let parsed: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| self.malformed(e.to_string()))?;

        let prediction = parsed
            .classifications
            .into_iter()
            .next()
            .and_then(|c| c.prediction)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| self.malformed("no prediction in response"))?;

        debug!(provider = %self.name, examples = examples.len(), %prediction, "classified");
        Ok(prediction)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
