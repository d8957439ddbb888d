//! Error taxonomy.
//!
//! Each subsystem has its own error enum; all of them fold into
//! [`TriageError`], which is what crosses crate boundaries.

mod classification_error;
mod embedding_error;
mod storage_error;

pub use classification_error::ClassificationError;
pub use embedding_error::EmbeddingError;
pub use storage_error::StorageError;

/// Result alias used throughout the workspace.
pub type TriageResult<T> = Result<T, TriageError>;

/// Top-level error type.
///
/// Every variant is fatal to the current session turn only; the session
/// loop reports it and goes back to waiting for input.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    #[error("embedding failed: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("classification failed: {0}")]
    ClassificationError(#[from] ClassificationError),

    #[error("unknown mood label: {label:?}")]
    UnknownMood { label: String },

    #[error("invalid example: {reason}")]
    InvalidExample { reason: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TriageError {
    /// Stable short name of the variant, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::EmbeddingError(_) => "embedding_error",
            Self::ClassificationError(_) => "classification_error",
            Self::UnknownMood { .. } => "unknown_mood",
            Self::InvalidExample { .. } => "invalid_example",
            Self::ConfigError(_) => "config_error",
            Self::SerializationError(_) => "serialization_error",
            Self::Io(_) => "io_error",
        }
    }
}
