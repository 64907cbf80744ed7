//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `surround-scm`.
#[derive(Debug, Parser)]
#[command(name = "surround-scm", version, about = "Check out and poll Surround SCM branches")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the branch into a workspace and capture the changelog for a new build.
    Checkout {
        /// Connection config (YAML).
        #[arg(long)]
        config: PathBuf,
        /// Directory the branch is fetched into.
        #[arg(long)]
        workspace: PathBuf,
    },
    /// Report whether changes since the last build warrant a new one.
    Poll {
        /// Connection config (YAML).
        #[arg(long)]
        config: PathBuf,
    },
    /// Print the entries of a captured `sscm cc` export.
    Changelog {
        /// Export file to parse.
        file: PathBuf,
        /// Build number the changes belong to.
        #[arg(long, default_value_t = 0)]
        build: u32,
    },
    /// Print the `sscm` command line that would run, credentials masked.
    ShowCommand {
        /// Connection config (YAML).
        #[arg(long)]
        config: PathBuf,
        /// Which command to show.
        #[arg(value_enum)]
        kind: CommandKind,
        /// Destination for `fetch`.
        #[arg(long, default_value = ".")]
        workspace: PathBuf,
    },
}

/// Command lines `show-command` can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommandKind {
    /// `sscm get` into the workspace.
    Fetch,
    /// `sscm cc` since the last recorded build.
    Changes,
}
