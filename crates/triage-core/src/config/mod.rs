//! Layered configuration.
//!
//! Resolution order (highest priority first):
//! 1. CLI flags (applied via `apply_cli_overrides`)
//! 2. Environment variables (`TRIAGE_*`, plus `COHERE_MODEL_NAME`)
//! 3. Config file (`--config` path, or `triage.toml` in the working directory)
//! 4. Compiled defaults

pub mod classifier_config;
pub mod defaults;
pub mod embedding_config;
pub mod retrieval_config;
pub mod seed_config;
pub mod session_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use classifier_config::ClassifierConfig;
pub use embedding_config::EmbeddingConfig;
pub use retrieval_config::RetrievalConfig;
pub use seed_config::SeedConfig;
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;

use crate::errors::{TriageError, TriageResult};

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub classifier: ClassifierConfig,
    pub retrieval: RetrievalConfig,
    pub session: SessionConfig,
    pub seed: SeedConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub top_k: Option<usize>,
    pub embedding_provider: Option<String>,
    pub seed_mood_path: Option<String>,
    pub seed_department_path: Option<String>,
}

impl TriageConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. The implicit `triage.toml` is
    /// only read when present.
    pub fn load(config_path: Option<&Path>, cli: Option<&CliOverrides>) -> TriageResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = Path::new(defaults::DEFAULT_CONFIG_FILENAME);
                if implicit.exists() {
                    Self::from_file(implicit)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        if let Some(cli) = cli {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML string. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> TriageResult<Self> {
        toml::from_str(toml_str)
            .map_err(|e| TriageError::ConfigError(format!("invalid TOML: {e}")))
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> TriageResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TriageError::ConfigError(format!("TOML serialization failed: {e}")))
    }

    fn from_file(path: &Path) -> TriageResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TriageError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| TriageError::ConfigError(format!("{}: {e}", path.display())))
    }

    /// Apply environment overrides through `lookup` (injected so tests do
    /// not have to mutate the process environment). Unparseable numeric
    /// values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TRIAGE_DB_PATH") {
            self.storage.db_path = v;
        }
        if let Some(v) = lookup("TRIAGE_EMBEDDING_PROVIDER") {
            self.embedding.provider = v;
        }
        if let Some(v) = lookup("TRIAGE_EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Some(v) = lookup("TRIAGE_TOP_K").and_then(|v| v.parse().ok()) {
            self.retrieval.top_k = v;
        }
        if let Some(v) = lookup("TRIAGE_CLASSIFIER_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.classifier.timeout_secs = v;
        }
        if let Some(v) = lookup("TRIAGE_QUIT_KEYWORD") {
            self.session.quit_keyword = v;
        }
        if let Some(v) = lookup("COHERE_MODEL_NAME") {
            self.classifier.model = v;
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            self.storage.db_path = v.clone();
        }
        if let Some(v) = cli.top_k {
            self.retrieval.top_k = v;
        }
        if let Some(ref v) = cli.embedding_provider {
            self.embedding.provider = v.clone();
        }
        if let Some(ref v) = cli.seed_mood_path {
            self.seed.mood_path = Some(v.clone());
        }
        if let Some(ref v) = cli.seed_department_path {
            self.seed.department_path = Some(v.clone());
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> TriageResult<()> {
        fn invalid(field: &str, message: &str) -> TriageResult<()> {
            Err(TriageError::ConfigError(format!("{field}: {message}")))
        }

        if self.storage.db_path.trim().is_empty() {
            return invalid("storage.db_path", "must not be empty");
        }
        if !(1..=8).contains(&self.storage.read_pool_size) {
            return invalid("storage.read_pool_size", "must be between 1 and 8");
        }
        if !matches!(self.embedding.provider.as_str(), "cohere" | "tfidf") {
            return invalid("embedding.provider", "must be \"cohere\" or \"tfidf\"");
        }
        if self.embedding.dimensions == 0 {
            return invalid("embedding.dimensions", "must be greater than 0");
        }
        if self.embedding.timeout_secs == 0 {
            return invalid("embedding.timeout_secs", "must be greater than 0");
        }
        if self.embedding.reindex_batch_size == 0 {
            return invalid("embedding.reindex_batch_size", "must be greater than 0");
        }
        if self.classifier.provider != "cohere" {
            return invalid("classifier.provider", "must be \"cohere\"");
        }
        if self.classifier.timeout_secs == 0 {
            return invalid("classifier.timeout_secs", "must be greater than 0");
        }
        if self.retrieval.top_k == 0 {
            return invalid("retrieval.top_k", "must be greater than 0");
        }
        if self.session.quit_keyword.trim().is_empty() {
            return invalid("session.quit_keyword", "must not be empty");
        }
        if self.seed.mood_path.is_some() != self.seed.department_path.is_some() {
            return invalid(
                "seed",
                "mood_path and department_path must be set together",
            );
        }
        Ok(())
    }
}
