//! Everything a session needs, built once at startup and passed in.

use std::sync::Arc;

use triage_classifier::{DualClassifier, PriorityRanker};
use triage_core::config::SessionConfig;
use triage_core::traits::{IExampleStore, IFewShotClassifier};
use triage_core::TriageConfig;
use triage_retrieval::Retriever;

pub struct TriageContext {
    pub store: Arc<dyn IExampleStore>,
    pub retriever: Retriever,
    pub classifier: DualClassifier,
    pub ranker: PriorityRanker,
    pub session: SessionConfig,
}

impl TriageContext {
    pub fn new(
        store: Arc<dyn IExampleStore>,
        classifier: Arc<dyn IFewShotClassifier>,
        config: &TriageConfig,
    ) -> Self {
        Self {
            retriever: Retriever::new(Arc::clone(&store), &config.retrieval),
            classifier: DualClassifier::new(classifier, &config.classifier),
            ranker: PriorityRanker::new(),
            session: config.session.clone(),
            store,
        }
    }
}
