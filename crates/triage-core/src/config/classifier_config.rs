use serde::{Deserialize, Serialize};

use super::defaults;

/// External classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Classifier provider. Only "cohere" is built in.
    pub provider: String,
    /// Model name sent with every classify request.
    pub model: String,
    /// Base URL of the classify API.
    pub endpoint: String,
    /// Timeout applied to each of the two per-turn calls.
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_CLASSIFIER_PROVIDER.to_string(),
            model: defaults::DEFAULT_CLASSIFIER_MODEL.to_string(),
            endpoint: defaults::DEFAULT_COHERE_ENDPOINT.to_string(),
            timeout_secs: defaults::DEFAULT_CLASSIFIER_TIMEOUT_SECS,
        }
    }
}
