//! # triage-core
//!
//! Foundation crate for the triage assistant.
//! Defines the example and mood models, the error taxonomy, the
//! store/embedding/classifier traits, and layered configuration.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TriageConfig;
pub use errors::{TriageError, TriageResult};
pub use models::{
    ClassificationResult, Example, ExampleSource, LabeledText, Mood, NewExample, Prediction,
    PriorityBand, SeedReport,
};
