//! Checkout and polling flows against a Surround SCM server.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::changelog::{ChangeSet, ChangelogParser};
use crate::context::ServiceContext;
use crate::error::ScmError;
use crate::ports::{BuildRecord, ListenerWriter, TaskListener};
use crate::scm::command::{change_list_command, fetch_command, ChangeListMode};
use crate::scm::config::ScmConfig;
use crate::scm::revision::RevisionState;
use crate::scm::volume::{ChangeVolumeEvaluator, PollingVerdict};
use crate::scm::window::TimeWindow;

/// Step at which a checkout stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// `sscm get` did not complete.
    Fetch,
    /// The host did not accept the revision record.
    Record,
    /// `sscm cc` did not complete.
    Changelog,
}

/// Result of [`SurroundScm::checkout`].
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// The checkout stopped at `stage`.
    Failed {
        /// Step that failed.
        stage: CheckoutStage,
        /// What went wrong.
        error: ScmError,
    },
    /// Workspace fetched and changelog captured.
    Done {
        /// Baseline attached to the build.
        revision: RevisionState,
        /// Changes since the previous build.
        changes: ChangeSet,
    },
}

impl CheckoutOutcome {
    /// `true` for [`CheckoutOutcome::Done`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}

/// Baseline derived from a build's own timestamp and number.
#[must_use]
pub fn calc_revision_state(build: &dyn BuildRecord) -> RevisionState {
    RevisionState::new(build.timestamp(), build.number())
}

/// A configured Surround SCM binding.
///
/// Holds no state between calls; every operation takes the service context
/// and console it should use.
pub struct SurroundScm {
    config: ScmConfig,
    scratch_dir: Option<PathBuf>,
}

impl SurroundScm {
    /// Binds to the server described by `config`.
    #[must_use]
    pub fn new(config: ScmConfig) -> Self {
        Self { config, scratch_dir: None }
    }

    /// Writes polling scratch files under `dir` instead of the temp directory.
    #[must_use]
    pub fn with_scratch_dir(mut self, dir: &Path) -> Self {
        self.scratch_dir = Some(dir.to_path_buf());
        self
    }

    /// The binding's configuration.
    #[must_use]
    pub fn config(&self) -> &ScmConfig {
        &self.config
    }

    /// Checks out the workspace for `build` and captures its changelog.
    ///
    /// Runs `sscm get` pinned to the current time, attaches a new
    /// [`RevisionState`] to the build, then captures `sscm cc` output for the
    /// window since the previous build into `changelog` and parses it.
    /// `Checkout completed.` is printed whatever the outcome.
    pub fn checkout(
        &self,
        ctx: &ServiceContext,
        build: &mut dyn BuildRecord,
        workspace: &Path,
        changelog: &Path,
        listener: &dyn TaskListener,
    ) -> CheckoutOutcome {
        listener.println(&format!("server: {}", self.config.connection.server));
        let outcome = self.run_checkout(ctx, build, workspace, changelog, listener);
        listener.println("Checkout completed.");
        outcome
    }

    fn run_checkout(
        &self,
        ctx: &ServiceContext,
        build: &mut dyn BuildRecord,
        workspace: &Path,
        changelog: &Path,
        listener: &dyn TaskListener,
    ) -> CheckoutOutcome {
        let now = ctx.clock.now();
        if let Err(error) = self.fetch_working_copy(ctx, workspace, now, listener) {
            return CheckoutOutcome::Failed { stage: CheckoutStage::Fetch, error };
        }

        let since = build.previous_build_date().unwrap_or_else(|| {
            listener.println("Never been built.");
            DateTime::<Utc>::UNIX_EPOCH
        });

        let revision = RevisionState::new(now, build.number());
        if let Err(source) = build.attach_revision(revision) {
            let error = ScmError::Record { build: build.number(), source };
            listener.fatal_error(&error.to_string());
            return CheckoutOutcome::Failed { stage: CheckoutStage::Record, error };
        }
        debug!(build = revision.build_number(), date = %revision.date(), "revision recorded");

        let window = TimeWindow::up_to(since, now);
        if let Err(error) = self.capture_changelog(ctx, workspace, &window, changelog, listener) {
            return CheckoutOutcome::Failed { stage: CheckoutStage::Changelog, error };
        }

        let changes = self.parse_changelog(ctx, build.number(), changelog);
        info!(build = build.number(), entries = changes.len(), "checkout finished");
        CheckoutOutcome::Done { revision, changes }
    }

    /// Runs `sscm get` into `workspace`, streaming its output to the console.
    ///
    /// # Errors
    ///
    /// Returns [`ScmError::Launch`] if the client cannot be started and
    /// [`ScmError::Exit`] if it exits nonzero. Both are also reported on the
    /// console as fatal lines.
    pub fn fetch_working_copy(
        &self,
        ctx: &ServiceContext,
        workspace: &Path,
        cutoff: DateTime<Utc>,
        listener: &dyn TaskListener,
    ) -> Result<(), ScmError> {
        let command = fetch_command(&self.config.connection, workspace, cutoff);
        info!(command = %command, "fetching working copy");

        let result = {
            let mut console = ListenerWriter::new(listener);
            ctx.launcher.launch(&command, Some(workspace), &mut console)
        };
        match result {
            Ok(0) => Ok(()),
            Ok(code) => {
                warn!(code, "fetch failed");
                listener.fatal_error(&format!("Fetch failed with exit code {code}"));
                Err(ScmError::Exit { command: command.to_string(), code })
            }
            Err(source) => {
                let error = ScmError::Launch { command: command.to_string(), source };
                listener.fatal_error(&error.to_string());
                Err(error)
            }
        }
    }

    /// Writes the `sscm cc` export for `window` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScmError::Sink`] if `path` cannot be written,
    /// [`ScmError::Launch`] if the client cannot be started and
    /// [`ScmError::Exit`] if it exits nonzero.
    pub fn capture_changelog(
        &self,
        ctx: &ServiceContext,
        workspace: &Path,
        window: &TimeWindow,
        path: &Path,
        listener: &dyn TaskListener,
    ) -> Result<(), ScmError> {
        let command = change_list_command(&self.config.connection, window, ChangeListMode::Full);
        debug!(command = %command, sink = %path.display(), "capturing changelog");

        let sink_error = |source: io::Error| ScmError::Sink { path: path.to_path_buf(), source };
        let mut sink = ctx.fs.create(path).map_err(|e| sink_error(io::Error::other(e)))?;
        let launched = ctx.launcher.launch(&command, Some(workspace), &mut sink);
        sink.flush().map_err(sink_error)?;
        drop(sink);

        match launched {
            Ok(0) => {}
            Ok(code) => {
                listener.fatal_error(&ChangeListMode::Full.failure_message(code));
                return Err(ScmError::Exit { command: command.to_string(), code });
            }
            Err(source) => {
                let error = ScmError::Launch { command: command.to_string(), source };
                listener.fatal_error(&error.to_string());
                return Err(error);
            }
        }

        listener.println("Changelog calculated successfully.");
        listener.println(&format!("Change log file: {}", path.display()));
        Ok(())
    }

    /// Counts changes since `baseline` and classifies them. Mutates nothing.
    pub fn compute_polling_verdict(
        &self,
        ctx: &ServiceContext,
        baseline: &RevisionState,
        listener: &dyn TaskListener,
    ) -> PollingVerdict {
        let window = TimeWindow::up_to(baseline.date(), ctx.clock.now());
        let evaluator = ChangeVolumeEvaluator::new(ctx, &self.config, listener);
        let evaluator = match &self.scratch_dir {
            Some(dir) => evaluator.with_scratch_dir(dir),
            None => evaluator,
        };
        let verdict = evaluator.verdict(&window);
        info!(since_build = baseline.build_number(), %verdict, "polled");
        verdict
    }

    /// Parses a changelog captured for `build_number`.
    #[must_use]
    pub fn parse_changelog(&self, ctx: &ServiceContext, build_number: u32, path: &Path) -> ChangeSet {
        ChangelogParser::new(ctx.users.as_ref()).parse_file(ctx.fs.as_ref(), build_number, path)
    }
}
