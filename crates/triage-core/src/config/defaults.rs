// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "triage.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "cohere";
pub const DEFAULT_EMBEDDING_MODEL: &str = "embed-english-v3.0";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 2;
pub const DEFAULT_REINDEX_BATCH_SIZE: usize = 50;

// --- Classifier ---
pub const DEFAULT_CLASSIFIER_PROVIDER: &str = "cohere";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "large";
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 30;

// --- Shared ---
pub const DEFAULT_COHERE_ENDPOINT: &str = "https://api.cohere.ai";

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 90;

// --- Session ---
pub const DEFAULT_QUIT_KEYWORD: &str = "quit";
pub const DEFAULT_PROMPT: &str = "You: ";

// --- Logging ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_ENV_VAR: &str = "TRIAGE_LOG";

// --- Config file ---
pub const DEFAULT_CONFIG_FILENAME: &str = "triage.toml";
