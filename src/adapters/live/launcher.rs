//! Launches the client with `std::process::Command`.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::PortError;
use crate::ports::launcher::Launcher;
use crate::scm::command::CommandLine;

/// Spawns real child processes.
///
/// Stdout is streamed into the caller's sink; stderr is inherited so client
/// diagnostics reach the console.
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(
        &self,
        command: &CommandLine,
        pwd: Option<&Path>,
        stdout: &mut dyn Write,
    ) -> Result<i32, PortError> {
        let mut process = Command::new(command.program());
        process
            .args(command.args().iter().map(|arg| arg.value()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(dir) = pwd {
            process.current_dir(dir);
        }

        debug!(command = %command, pwd = ?pwd, "spawning");
        let mut child = process.spawn()?;
        let copied = match child.stdout.take() {
            Some(mut out) => io::copy(&mut out, stdout),
            None => Ok(0),
        };
        let status = child.wait()?;
        let bytes = copied?;
        stdout.flush()?;

        let code = status.code().unwrap_or(-1);
        debug!(command = %command, code, bytes, "process exited");
        Ok(code)
    }
}
