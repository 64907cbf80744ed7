//! Argument lists for the `sscm` client.
//!
//! Every flag is a single token with its value glued on (`-bMainline`, not
//! `-b Mainline`); the client's argument grammar requires it.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::scm::config::ConnectionConfig;
use crate::scm::window::{format_cutoff, TimeWindow};

/// Text shown in place of a masked argument.
pub const MASK: &str = "******";

/// Scope token naming the repository root; `-r` makes it recursive.
const ROOT_SCOPE: &str = "/";

/// One argument of a command line.
#[derive(Clone, PartialEq, Eq)]
pub enum Arg {
    /// Passed and displayed verbatim.
    Plain(String),
    /// Passed verbatim but displayed as [`MASK`].
    Masked(String),
}

impl Arg {
    /// The value handed to the process.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(v) | Self::Masked(v) => v,
        }
    }

    /// The value safe to print or record.
    #[must_use]
    pub fn display_value(&self) -> &str {
        match self {
            Self::Plain(v) => v,
            Self::Masked(_) => MASK,
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.display_value())
    }
}

/// A program followed by its arguments, some of which may be secret.
///
/// `Display` and `Debug` never reveal masked arguments.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<Arg>,
}

impl CommandLine {
    /// Starts a command line for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    /// Appends a plain argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(value.into()));
        self
    }

    /// Appends an argument that must never be shown.
    #[must_use]
    pub fn masked_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Masked(value.into()));
        self
    }

    /// The executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments after the program.
    #[must_use]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Every token, program first, with masked values revealed. For process launch only.
    #[must_use]
    pub fn to_vec(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(Arg::value)).collect()
    }

    /// Every token, program first, with masked values hidden.
    #[must_use]
    pub fn to_masked_vec(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(Arg::display_value))
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_masked_vec().join(" "))
    }
}

impl fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_masked_vec()).finish()
    }
}

/// What a change-list invocation is for.
///
/// The client prints its `total-N` line first in either case, so both modes
/// produce the same arguments; the mode only decides how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeListMode {
    /// Capture the whole export for the changelog.
    Full,
    /// Read only the total line to decide whether to build.
    CountOnly,
}

impl ChangeListMode {
    /// Build-log line for a nonzero exit.
    #[must_use]
    pub fn failure_message(self, exit_code: i32) -> String {
        match self {
            Self::Full => format!("Changelog failed with exit code {exit_code}"),
            Self::CountOnly => format!("Determine changes count failed with exit code {exit_code}"),
        }
    }
}

fn with_connection(command: CommandLine, config: &ConnectionConfig) -> CommandLine {
    command
        .masked_arg(format!("-y{}:{}", config.user_name, config.password.expose()))
        .arg(format!("-z{}:{}", config.server, config.server_port))
        .arg(format!("-b{}", config.branch))
        .arg(format!("-p{}", config.repository))
}

/// `sscm get / -wreplace -y… -z… -b… -p… -d<dest> -r -s<cutoff>`
///
/// Overwrites the workspace and pins the fetch to `cutoff`.
#[must_use]
pub fn fetch_command(
    config: &ConnectionConfig,
    destination: &Path,
    cutoff: DateTime<Utc>,
) -> CommandLine {
    let command = CommandLine::new(&config.executable).arg("get").arg(ROOT_SCOPE).arg("-wreplace");
    with_connection(command, config)
        .arg(format!("-d{}", destination.display()))
        .arg("-r")
        .arg(format!("-s{}", format_cutoff(cutoff, config.timestamp_zone)))
}

/// `sscm cc / -d<start>:<end> -y… -z… -b… -p… -r`
#[must_use]
pub fn change_list_command(
    config: &ConnectionConfig,
    window: &TimeWindow,
    _mode: ChangeListMode,
) -> CommandLine {
    let command = CommandLine::new(&config.executable)
        .arg("cc")
        .arg(ROOT_SCOPE)
        .arg(format!("-d{}", window.format_range(config.timestamp_zone)));
    with_connection(command, config).arg("-r")
}
