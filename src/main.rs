//! Binary entrypoint for the `surround-scm` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the diagnostic log filter.
const LOG_ENV: &str = "SSCM_LOG";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Recording and replay are handled in commands::dispatch via SSCM_RECORD / SSCM_REPLAY.
    match surround_scm::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
