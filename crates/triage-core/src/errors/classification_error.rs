/// Errors from the external few-shot classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("{provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("{provider} timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },

    #[error("malformed response from {provider}: {reason}")]
    MalformedResponse { provider: String, reason: String },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },
}
