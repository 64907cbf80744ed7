//! Surround SCM binding for CI: checkout, changelog parsing and change polling.
//!
//! The core lives in [`scm`] and [`changelog`]. Everything that touches the
//! outside world goes through the traits in [`ports`], wired together by a
//! [`context::ServiceContext`].

pub mod adapters;
pub mod cassette;
pub mod changelog;
pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod ports;
pub mod scm;
pub mod secret;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
