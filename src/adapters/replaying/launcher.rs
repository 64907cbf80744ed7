//! Replaying adapter for the `Launcher` port.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Deserialize;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;
use crate::ports::Launcher;
use crate::scm::command::CommandLine;

/// Serves recorded launches: writes the recorded stdout and returns the exit code.
pub struct ReplayingLauncher {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLauncher {
    /// Creates a launcher over `replayer`.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

#[derive(Deserialize)]
struct LaunchRecord {
    exit_code: i32,
    #[serde(default)]
    stdout: String,
}

impl Launcher for ReplayingLauncher {
    fn launch(
        &self,
        _command: &CommandLine,
        _pwd: Option<&Path>,
        stdout: &mut dyn Write,
    ) -> Result<i32, PortError> {
        let output = next_output(&self.replayer, "launcher", "launch");
        if let Some(err) = output.get("err") {
            return Err(err.as_str().unwrap_or("unknown error").to_string().into());
        }
        let value = output.get("ok").cloned().unwrap_or(output);
        let record: LaunchRecord = serde_json::from_value(value)
            .map_err(|e| format!("launcher::launch: bad recording: {e}"))?;
        stdout.write_all(record.stdout.as_bytes())?;
        stdout.flush()?;
        Ok(record.exit_code)
    }
}
