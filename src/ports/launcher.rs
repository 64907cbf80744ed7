//! Launcher port for running the `sscm` client.

use std::io::Write;
use std::path::Path;

use crate::error::PortError;
use crate::scm::command::CommandLine;

/// Runs an external command to completion.
///
/// The call blocks until the child exits. Standard output is copied into
/// `stdout` as it is produced and stdin is closed. There is no timeout.
pub trait Launcher: Send + Sync {
    /// Launches `command` in `pwd` (or the current directory) and returns its exit code.
    ///
    /// A nonzero exit is reported as `Ok(code)`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or its output cannot
    /// be copied into `stdout`.
    fn launch(
        &self,
        command: &CommandLine,
        pwd: Option<&Path>,
        stdout: &mut dyn Write,
    ) -> Result<i32, PortError>;
}
