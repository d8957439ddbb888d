pub mod cohere_classifier;

pub use cohere_classifier::CohereClassifier;

use std::sync::Arc;

use triage_core::config::ClassifierConfig;
use triage_core::errors::{TriageError, TriageResult};
use triage_core::traits::IFewShotClassifier;

/// Build the configured classifier. Cohere needs an API key.
pub fn create_classifier(
    config: &ClassifierConfig,
    api_key: Option<&str>,
) -> TriageResult<Arc<dyn IFewShotClassifier>> {
    match config.provider.as_str() {
        "cohere" => {
            let key = api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    TriageError::ConfigError(
                        "COHERE_KEY is not set; the cohere classifier needs an API key".to_string(),
                    )
                })?;
            Ok(Arc::new(CohereClassifier::new(config, key.to_string())?))
        }
        other => Err(TriageError::ConfigError(format!(
            "unknown classifier provider: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohere_requires_key() {
        let config = ClassifierConfig::default();
        assert!(matches!(
            create_classifier(&config, None),
            Err(TriageError::ConfigError(_))
        ));
        assert!(create_classifier(&config, Some("")).is_err());
        assert_eq!(create_classifier(&config, Some("k")).unwrap().name(), "cohere/large");
    }

    #[test]
    fn unknown_provider_rejected() {
        let config = ClassifierConfig {
            provider: "oracle".to_string(),
            ..Default::default()
        };
        assert!(create_classifier(&config, Some("k")).is_err());
    }
}
