use serde::{Deserialize, Serialize};

/// Seed set configuration. Both paths unset means the built-in set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Run the seeder at startup.
    pub enabled: bool,
    /// JSON array of `{text, label}` rows labeled with moods.
    pub mood_path: Option<String>,
    /// JSON array of `{text, label}` rows labeled with departments,
    /// row-aligned with `mood_path`.
    pub department_path: Option<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mood_path: None,
            department_path: None,
        }
    }
}
