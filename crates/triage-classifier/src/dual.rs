//! Dual classifier: mood and department predicted independently from the
//! same retrieved context.

use std::sync::Arc;
use std::time::Duration;

use triage_core::config::ClassifierConfig;
use triage_core::errors::{ClassificationError, TriageResult};
use triage_core::traits::IFewShotClassifier;
use triage_core::{Example, LabeledText, Prediction};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct DualClassifier {
    classifier: Arc<dyn IFewShotClassifier>,
    timeout: Duration,
}

impl DualClassifier {
    pub fn new(classifier: Arc<dyn IFewShotClassifier>, config: &ClassifierConfig) -> Self {
        Self::with_timeout(classifier, Duration::from_secs(config.timeout_secs))
    }

    pub fn with_timeout(classifier: Arc<dyn IFewShotClassifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    /// Predict `(mood, department)` for `query`.
    ///
    /// An empty context yields `(Unclassified, Unclassified)` without any
    /// external call. Otherwise both calls run concurrently and either
    /// failing fails the whole classification.
    #[instrument(skip_all, fields(context = context.len()))]
    pub async fn classify(
        &self,
        query: &str,
        context: &[Example],
    ) -> TriageResult<(Prediction, Prediction)> {
        if context.is_empty() {
            debug!("no context examples; skipping external classifier");
            return Ok((Prediction::Unclassified, Prediction::Unclassified));
        }

        let mood_examples: Vec<LabeledText> = context.iter().map(Example::mood_view).collect();
        let department_examples: Vec<LabeledText> =
            context.iter().map(Example::department_view).collect();

        let (mood, department) = tokio::try_join!(
            self.call(query, &mood_examples),
            self.call(query, &department_examples),
        )?;

        Ok((Prediction::Label(mood), Prediction::Label(department)))
    }

    async fn call(&self, query: &str, examples: &[LabeledText]) -> TriageResult<String> {
        match tokio::time::timeout(self.timeout, self.classifier.classify(query, examples)).await {
            Ok(result) => result,
            Err(_) => Err(ClassificationError::Timeout {
                provider: self.classifier.name().to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
            .into()),
        }
    }
}
