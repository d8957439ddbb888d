//! Tracing subscriber setup. Logs go to stderr so they never interleave
//! with the interactive transcript on stdout.

use tracing_subscriber::EnvFilter;
use triage_core::config::defaults::{DEFAULT_LOG_LEVEL, LOG_ENV_VAR};

/// Install the global subscriber. `TRIAGE_LOG` takes an `EnvFilter` directive.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    // A subscriber may already be installed when embedded; keep it.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
