use async_trait::async_trait;

use crate::errors::TriageResult;
use crate::models::LabeledText;

/// External few-shot text classifier.
///
/// Given one input and a non-empty list of labeled examples, predicts a
/// single label. Callers must not invoke it with an empty example list.
#[async_trait]
pub trait IFewShotClassifier: Send + Sync {
    async fn classify(&self, input: &str, examples: &[LabeledText]) -> TriageResult<String>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
