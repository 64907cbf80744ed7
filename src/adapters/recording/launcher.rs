//! Recording adapter for the `Launcher` port.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::error::PortError;
use crate::ports::Launcher;
use crate::scm::command::CommandLine;

/// Records each launch (masked command, exit code, stdout) while delegating.
pub struct RecordingLauncher {
    inner: Box<dyn Launcher>,
    recorder: SharedRecorder,
}

impl RecordingLauncher {
    /// Wraps `inner`.
    pub fn new(inner: Box<dyn Launcher>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct LaunchInput<'a> {
    command: Vec<&'a str>,
    pwd: Option<String>,
}

/// What a replay needs to reproduce a launch.
#[derive(Serialize)]
pub(crate) struct LaunchRecord {
    pub exit_code: i32,
    pub stdout: String,
}

/// Copies everything written through it into a buffer as well.
struct Tee<'a> {
    sink: &'a mut dyn Write,
    copy: Vec<u8>,
}

impl Write for Tee<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.sink.write(buf)?;
        self.copy.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(
        &self,
        command: &CommandLine,
        pwd: Option<&Path>,
        stdout: &mut dyn Write,
    ) -> Result<i32, PortError> {
        let mut tee = Tee { sink: stdout, copy: Vec::new() };
        let result = self.inner.launch(command, pwd, &mut tee);
        let recorded = result.as_ref().map(|&exit_code| LaunchRecord {
            exit_code,
            stdout: String::from_utf8_lossy(&tee.copy).into_owned(),
        });
        let input = LaunchInput {
            command: command.to_masked_vec(),
            pwd: pwd.map(|p| p.display().to_string()),
        };
        record_result(&self.recorder, "launcher", "launch", &input, &recorded);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cassette::format::Cassette;
    use crate::cassette::recorder::CassetteRecorder;

    struct Echo;

    impl Launcher for Echo {
        fn launch(
            &self,
            _command: &CommandLine,
            _pwd: Option<&Path>,
            stdout: &mut dyn Write,
        ) -> Result<i32, PortError> {
            stdout.write_all(b"total-2\n")?;
            Ok(1)
        }
    }

    #[test]
    fn records_masked_command_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));

        let mut out = Vec::new();
        {
            let launcher = RecordingLauncher::new(Box::new(Echo), Arc::clone(&recorder));
            let command = CommandLine::new("sscm").arg("cc").masked_arg("-yuser:secret");
            assert_eq!(launcher.launch(&command, None, &mut out).unwrap(), 1);
        }
        assert_eq!(out, b"total-2\n");

        Arc::try_unwrap(recorder).unwrap().into_inner().unwrap().finish().unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("secret"));

        let cassette = Cassette::load(&path).unwrap();
        let interaction = &cassette.interactions[0];
        assert_eq!(interaction.input["command"][2], "******");
        assert_eq!(interaction.output["ok"]["exit_code"], 1);
        assert_eq!(interaction.output["ok"]["stdout"], "total-2\n");
    }
}
