use serde::{Deserialize, Serialize};

use super::defaults;

/// Interactive session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Input that ends the session (case-insensitive).
    pub quit_keyword: String,
    /// Prompt shown before each line of input.
    pub prompt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quit_keyword: defaults::DEFAULT_QUIT_KEYWORD.to_string(),
            prompt: defaults::DEFAULT_PROMPT.to_string(),
        }
    }
}
