//! Command dispatch and handlers.

pub mod changelog;
pub mod checkout;
pub mod poll;
pub mod show_command;

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::context::ServiceContext;
use crate::scm::ScmConfig;
use crate::store::{DEFAULT_ROOT, ROOT_ENV};

/// Environment variable naming a directory to record port interactions into.
pub const RECORD_ENV: &str = "SSCM_RECORD";

/// Environment variable naming a cassette to replay instead of running `sscm`.
pub const REPLAY_ENV: &str = "SSCM_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// When `SSCM_RECORD` is set to a directory path, clock, launcher and ID
/// interactions are recorded to per-port cassette files in that directory.
/// When `SSCM_REPLAY` names a cassette, they are served from it instead.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    if let Ok(path) = env::var(REPLAY_ENV) {
        debug!(cassette = %path, "replaying");
        let ctx = ServiceContext::replaying(Path::new(&path))?;
        return dispatch_with_context(command, &ctx);
    }

    let (ctx, session) = if let Ok(path) = env::var(RECORD_ENV) {
        let (ctx, session) = ServiceContext::recording_at(Path::new(&path))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(command, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Checkout { config, workspace } => checkout::run(ctx, config, workspace),
        Command::Poll { config } => poll::run(ctx, config),
        Command::Changelog { file, build } => changelog::run(ctx, file, *build),
        Command::ShowCommand { config, kind, workspace } => {
            show_command::run(ctx, config, *kind, workspace)
        }
    }
}

/// Loads the connection config through the context's filesystem.
fn load_config(ctx: &ServiceContext, path: &Path) -> Result<ScmConfig, String> {
    ScmConfig::load(ctx.fs.as_ref(), path).map_err(|e| e.to_string())
}

/// Build store root: `SSCM_STORE` or `.sscm`.
fn store_root() -> PathBuf {
    env::var_os(ROOT_ENV).map_or_else(|| PathBuf::from(DEFAULT_ROOT), PathBuf::from)
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
