mod classifier;
mod embedding;
mod example_store;

pub use classifier::IFewShotClassifier;
pub use embedding::IEmbeddingProvider;
pub use example_store::{IExampleStore, ScoredExample};
