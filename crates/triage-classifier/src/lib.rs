//! # triage-classifier
//!
//! Predicts mood and department for one query using retrieved examples as
//! few-shot context, and ranks the predicted mood by urgency.

pub mod dual;
pub mod priority;
pub mod providers;

pub use dual::DualClassifier;
pub use priority::PriorityRanker;
pub use providers::{create_classifier, CohereClassifier};
