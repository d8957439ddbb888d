mod args;
mod logging;
mod startup;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::error;
use triage_core::TriageConfig;
use triage_session::{Session, SessionSummary, TerminalPresenter};

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    logging::init_tracing(args.log_json);

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "triage exited with an error");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<SessionSummary> {
    let config = TriageConfig::load(args.config.as_deref(), Some(&args.overrides()))
        .context("invalid configuration")?;
    let ctx = startup::build_context(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let summary = runtime.block_on(async {
        let input = BufReader::new(tokio::io::stdin());
        let mut session = Session::new(&ctx, TerminalPresenter::stdout());
        session.run(input).await
    })?;

    // Blocking HTTP clients inside the context must not drop on a runtime thread.
    drop(runtime);
    drop(ctx);
    Ok(summary)
}
