//! Change counting and the polling verdict.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::ServiceContext;
use crate::ports::{FileSystem, TaskListener};
use crate::scm::command::{change_list_command, ChangeListMode, CommandLine};
use crate::scm::config::ScmConfig;
use crate::scm::window::TimeWindow;

/// Counts at or above this trigger an immediate build.
pub const CHANGES_THRESHOLD: u64 = 5;

/// Width of the `total-` prefix in front of the count.
pub const TOTAL_PREFIX_LEN: usize = 6;

/// Count reported under [`CountFallback::AssumeMany`].
pub const ASSUMED_MANY_CHANGES: u64 = 500;

/// What to assume when the client's total line is missing or unreadable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountFallback {
    /// Report [`ASSUMED_MANY_CHANGES`], forcing a build.
    #[default]
    AssumeMany,
    /// Report zero, skipping the build.
    AssumeZero,
}

impl CountFallback {
    /// The count this policy substitutes.
    #[must_use]
    pub fn count(self) -> u64 {
        match self {
            Self::AssumeMany => ASSUMED_MANY_CHANGES,
            Self::AssumeZero => 0,
        }
    }
}

/// Scheduling hint returned to the host after polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollingVerdict {
    /// Nothing changed.
    NoChanges,
    /// A few changes; a build may run and may be coalesced.
    Significant,
    /// Enough changes to build immediately.
    BuildNow,
}

impl PollingVerdict {
    /// Classifies a change count against [`CHANGES_THRESHOLD`].
    #[must_use]
    pub fn classify(count: u64) -> Self {
        match count {
            0 => Self::NoChanges,
            n if n < CHANGES_THRESHOLD => Self::Significant,
            _ => Self::BuildNow,
        }
    }

    /// Upper-case name as reported to the host.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoChanges => "NO_CHANGES",
            Self::Significant => "SIGNIFICANT",
            Self::BuildNow => "BUILD_NOW",
        }
    }
}

impl fmt::Display for PollingVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the count out of a `total-N` line.
///
/// The first [`TOTAL_PREFIX_LEN`] characters are dropped whatever they are;
/// the trimmed remainder must be a non-negative number. A fractional total
/// is floored, except that anything above zero counts as at least one
/// change, so `total-0.5` and `total-4.5` classify like `1` and `4`.
#[must_use]
pub fn parse_total_line(line: &str) -> Option<u64> {
    let (offset, _) = line.char_indices().nth(TOTAL_PREFIX_LEN)?;
    let total = line[offset..].trim();
    if let Ok(count) = total.parse::<u64>() {
        return Some(count);
    }
    let value: f64 = total.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = if value > 0.0 { value.floor().max(1.0) as u64 } else { 0 };
    Some(count)
}

/// Removes its file when dropped.
struct ScratchFile<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl Drop for ScratchFile<'_> {
    fn drop(&mut self) {
        if self.fs.exists(&self.path) {
            if let Err(err) = self.fs.remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %err, "failed to remove scratch file");
            }
        }
    }
}

/// Runs `sscm cc` over a window and turns its total line into a count.
///
/// Tool failures are logged to the build console and never abort the
/// evaluation; whatever output exists is still read, and an unreadable total
/// falls back to the configured [`CountFallback`].
pub struct ChangeVolumeEvaluator<'a> {
    ctx: &'a ServiceContext,
    config: &'a ScmConfig,
    listener: &'a dyn TaskListener,
    scratch_dir: PathBuf,
}

impl<'a> ChangeVolumeEvaluator<'a> {
    /// Creates an evaluator writing scratch output to the system temp directory.
    #[must_use]
    pub fn new(
        ctx: &'a ServiceContext,
        config: &'a ScmConfig,
        listener: &'a dyn TaskListener,
    ) -> Self {
        Self { ctx, config, listener, scratch_dir: std::env::temp_dir() }
    }

    /// Writes scratch output under `dir` instead.
    #[must_use]
    pub fn with_scratch_dir(mut self, dir: &Path) -> Self {
        self.scratch_dir = dir.to_path_buf();
        self
    }

    /// Number of changes the server reports within `window`.
    pub fn count_changes(&self, window: &TimeWindow) -> u64 {
        let connection = &self.config.connection;
        self.listener.println(&format!("in determine Change Count server: {}", connection.server));

        let scratch = ScratchFile {
            fs: self.ctx.fs.as_ref(),
            path: self.scratch_dir.join(format!("changes-{}.txt", self.ctx.id_gen.generate_id())),
        };
        let command = change_list_command(connection, window, ChangeListMode::CountOnly);
        debug!(command = %command, sink = %scratch.path.display(), "counting changes");

        self.capture(&command, &scratch.path);
        let count = self.read_count(&scratch.path);
        drop(scratch);

        self.listener.println(&format!("Number of changes determined to be: {count}"));
        count
    }

    /// Counts changes in `window` and classifies the result.
    pub fn verdict(&self, window: &TimeWindow) -> PollingVerdict {
        PollingVerdict::classify(self.count_changes(window))
    }

    fn capture(&self, command: &CommandLine, path: &Path) {
        let mut sink = match self.ctx.fs.create(path) {
            Ok(sink) => sink,
            Err(err) => {
                self.listener.fatal_error(&format!("Cannot create {}: {err}", path.display()));
                return;
            }
        };
        match self.ctx.launcher.launch(command, None, &mut sink) {
            Ok(0) => {}
            Ok(code) => self.listener.fatal_error(&ChangeListMode::CountOnly.failure_message(code)),
            Err(err) => self.listener.fatal_error(&format!("Failed to run {command}: {err}")),
        }
        if let Err(err) = sink.flush() {
            warn!(path = %path.display(), error = %err, "failed to flush change count output");
        }
    }

    fn read_count(&self, path: &Path) -> u64 {
        let fallback = self.config.polling.on_unreadable_count;
        let mut reader = match self.ctx.fs.open(path) {
            Ok(reader) => reader,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "change count output unavailable");
                return fallback.count();
            }
        };

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                warn!(?fallback, "client printed no total line");
                return fallback.count();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, ?fallback, "cannot read total line");
                return fallback.count();
            }
        }

        let line = line.trim_end_matches(['\n', '\r']);
        self.listener.println(line);
        parse_total_line(line).unwrap_or_else(|| {
            self.listener.fatal_error(&format!("Cannot read change count from {line:?}"));
            fallback.count()
        })
    }
}
