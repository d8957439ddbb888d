//! Seed sets: aligned mood and department tables combined into examples.

mod tables;

pub use tables::{combine_tables, parse_table};

use std::path::Path;

use triage_core::config::SeedConfig;
use triage_core::errors::{TriageError, TriageResult};
use triage_core::NewExample;

const BUILTIN_MOOD: &str = include_str!("../../data/mood_seed.json");
const BUILTIN_DEPARTMENT: &str = include_str!("../../data/department_seed.json");

/// An ordered, validated set of seed examples.
#[derive(Debug, Clone)]
pub struct SeedSet {
    examples: Vec<NewExample>,
}

impl SeedSet {
    pub fn new(examples: Vec<NewExample>) -> Self {
        Self { examples }
    }

    pub fn examples(&self) -> &[NewExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// blake3 over every triple's content hash, in order.
    pub fn version(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for example in &self.examples {
            hasher.update(example.content_hash().as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex()[..16].to_string()
    }
}

/// The 25-row superhero support set shipped with the binary.
pub fn builtin_seed_set() -> TriageResult<SeedSet> {
    let mood = parse_table(BUILTIN_MOOD, "builtin mood table")?;
    let department = parse_table(BUILTIN_DEPARTMENT, "builtin department table")?;
    combine_tables(mood, department).map(SeedSet::new)
}

/// Seed set from config: both JSON paths, or the built-in set when neither is given.
pub fn load_seed_set(config: &SeedConfig) -> TriageResult<SeedSet> {
    match (&config.mood_path, &config.department_path) {
        (Some(mood), Some(department)) => {
            let mood = read_table(Path::new(mood))?;
            let department = read_table(Path::new(department))?;
            combine_tables(mood, department).map(SeedSet::new)
        }
        (None, None) => builtin_seed_set(),
        _ => Err(TriageError::ConfigError(
            "seed.mood_path and seed.department_path must be set together".to_string(),
        )),
    }
}

fn read_table(path: &Path) -> TriageResult<Vec<triage_core::LabeledText>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        TriageError::ConfigError(format!("failed to read seed table {}: {e}", path.display()))
    })?;
    parse_table(&raw, &path.display().to_string())
}
