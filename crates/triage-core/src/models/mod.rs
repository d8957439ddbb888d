mod classification_result;
mod example;
mod mood;
mod prediction;
mod seed_report;

pub use classification_result::ClassificationResult;
pub use example::{Example, ExampleSource, LabeledText, NewExample};
pub use mood::{Mood, PriorityBand};
pub use prediction::Prediction;
pub use seed_report::SeedReport;
