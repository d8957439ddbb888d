use std::path::PathBuf;

use clap::Parser;
use triage_core::config::CliOverrides;

#[derive(Debug, Parser)]
#[command(
    name = "triage",
    version,
    about = "Classify support requests by mood and department, learning from every turn"
)]
pub struct Args {
    /// TOML config file. Defaults to ./triage.toml when present.
    #[arg(long, short = 'c', env = "TRIAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Example store database path.
    #[arg(long)]
    pub db: Option<String>,

    /// Context examples retrieved per query.
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Embedding provider.
    #[arg(long, value_parser = ["cohere", "tfidf"])]
    pub embedding_provider: Option<String>,

    /// JSON seed table labeled with moods.
    #[arg(long, requires = "seed_department")]
    pub seed_mood: Option<String>,

    /// JSON seed table labeled with departments, row-aligned with --seed-mood.
    #[arg(long, requires = "seed_mood")]
    pub seed_department: Option<String>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            db_path: self.db.clone(),
            top_k: self.top_k,
            embedding_provider: self.embedding_provider.clone(),
            seed_mood_path: self.seed_mood.clone(),
            seed_department_path: self.seed_department.clone(),
        }
    }
}
