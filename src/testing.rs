//! Test doubles for the port traits.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::context::ServiceContext;
use crate::error::PortError;
use crate::ports::{Clock, FileSystem, IdGenerator, Launcher, TaskListener, User, UserDirectory};
use crate::scm::command::CommandLine;
use crate::scm::config::{ConnectionConfig, ScmConfig, TimestampZone};
use crate::secret::Secret;

/// Config pointing at a fake server, formatting timestamps in UTC.
pub fn test_config() -> ScmConfig {
    let mut connection = ConnectionConfig::new(
        "scm.example.com",
        4900,
        "builder",
        Secret::new("pw"),
        "Mainline",
        "Mainline/Product",
    );
    connection.timestamp_zone = TimestampZone::Utc;
    ScmConfig::new(connection)
}

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out `id-0`, `id-1`, ...
#[derive(Default)]
pub struct SequentialIds {
    next: Mutex<u32>,
}

impl IdGenerator for SequentialIds {
    fn generate_id(&self) -> String {
        let mut next = self.next.lock().unwrap();
        let id = format!("id-{next}");
        *next += 1;
        id
    }
}

/// Resolves every non-blank name to a user with that name.
pub struct NameUsers;

impl UserDirectory for NameUsers {
    fn resolve(&self, name: &str) -> Option<User> {
        let name = name.trim();
        (!name.is_empty()).then(|| User { id: name.to_string(), display_name: name.to_string() })
    }
}

/// One scripted process run.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Writes `stdout` and exits with `exit_code`.
    Exit { exit_code: i32, stdout: String },
    /// Fails to start.
    SpawnError(String),
}

/// A launch the scripted launcher received.
#[derive(Debug, Clone)]
pub struct Launched {
    /// Masked command line.
    pub command: String,
    /// Working directory, if any.
    pub pwd: Option<PathBuf>,
}

/// Plays back scripted runs in order; an empty script exits 0 silently.
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    launched: Arc<Mutex<Vec<Launched>>>,
}

impl ScriptedLauncher {
    pub fn push(&self, run: Scripted) {
        self.script.lock().unwrap().push_back(run);
    }

    pub fn launched(&self) -> Vec<Launched> {
        self.launched.lock().unwrap().clone()
    }
}

impl Launcher for ScriptedLauncher {
    fn launch(
        &self,
        command: &CommandLine,
        pwd: Option<&Path>,
        stdout: &mut dyn Write,
    ) -> Result<i32, PortError> {
        self.launched
            .lock()
            .unwrap()
            .push(Launched { command: command.to_string(), pwd: pwd.map(Path::to_path_buf) });
        let next = self.script.lock().unwrap().pop_front();
        match next {
            None => Ok(0),
            Some(Scripted::Exit { exit_code, stdout: out }) => {
                stdout.write_all(out.as_bytes())?;
                Ok(exit_code)
            }
            Some(Scripted::SpawnError(msg)) => Err(msg.into()),
        }
    }
}

/// Keeps every line written to the build console.
#[derive(Default)]
pub struct CapturingListener {
    lines: RefCell<Vec<(bool, String)>>,
}

impl CapturingListener {
    /// Informational lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().filter(|(fatal, _)| !fatal).map(|(_, l)| l.clone()).collect()
    }

    /// Fatal lines.
    pub fn fatal_lines(&self) -> Vec<String> {
        self.lines.borrow().iter().filter(|(fatal, _)| *fatal).map(|(_, l)| l.clone()).collect()
    }
}

impl TaskListener for CapturingListener {
    fn println(&self, line: &str) {
        self.lines.borrow_mut().push((false, line.to_string()));
    }

    fn fatal_error(&self, line: &str) {
        self.lines.borrow_mut().push((true, line.to_string()));
    }
}

type Files = Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>;

/// Filesystem held entirely in memory.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    files: Files,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl MemoryFileSystem {
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

struct MemoryFile {
    files: Files,
    path: PathBuf,
    buf: Vec<u8>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.files.lock().unwrap().insert(self.path.clone(), self.buf.clone());
        Ok(())
    }
}

impl Drop for MemoryFile {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.file(path).ok_or_else(|| format!("{}: not found", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().keys().any(|p| p.starts_with(path))
            || self.dirs.lock().unwrap().iter().any(|p| p.starts_with(path))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let files = self.files.lock().unwrap();
        let dirs = self.dirs.lock().unwrap();
        let names: BTreeSet<String> = files
            .keys()
            .chain(dirs.iter())
            .filter_map(|p| p.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if names.is_empty() && !dirs.contains(path) {
            return Err(format!("{}: not a directory", path.display()).into());
        }
        Ok(names.into_iter().collect())
    }

    fn create(&self, path: &Path) -> Result<Box<dyn Write + Send>, PortError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MemoryFile {
            files: Arc::clone(&self.files),
            path: path.to_path_buf(),
            buf: Vec::new(),
        }))
    }

    fn open(&self, path: &Path) -> Result<Box<dyn std::io::BufRead + Send>, PortError> {
        let bytes = self
            .files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("{}: not found", path.display()))?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| format!("{}: not found", path.display()).into())
    }
}

/// A context wired to test doubles, a scratch directory and a capturing console.
///
/// The filesystem is live and rooted wherever callers point it; use
/// [`TestHarness::dir`] for anything written during a test.
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub listener: CapturingListener,
    launcher: ScriptedLauncher,
    dir: TempDir,
}

impl TestHarness {
    /// Clock fixed at 2024-01-01T00:00:00Z.
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        let launcher = ScriptedLauncher::default();
        let ctx = ServiceContext {
            clock: Box::new(FixedClock(now)),
            fs: Box::new(LiveFileSystem),
            launcher: Box::new(launcher.clone()),
            id_gen: Box::new(SequentialIds::default()),
            users: Box::new(NameUsers),
        };
        Self {
            ctx,
            listener: CapturingListener::default(),
            launcher,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Queues a run that prints `stdout` and exits with `exit_code`.
    #[must_use]
    pub fn with_launch(self, exit_code: i32, stdout: &str) -> Self {
        self.launcher.push(Scripted::Exit { exit_code, stdout: stdout.to_string() });
        self
    }

    /// Queues a run that fails to start.
    #[must_use]
    pub fn with_launch_error(self, msg: &str) -> Self {
        self.launcher.push(Scripted::SpawnError(msg.to_string()));
        self
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Masked command lines launched so far.
    pub fn launched(&self) -> Vec<String> {
        self.launcher.launched().into_iter().map(|l| l.command).collect()
    }

    /// Working directories of the launches so far.
    pub fn launched_pwds(&self) -> Vec<Option<PathBuf>> {
        self.launcher.launched().into_iter().map(|l| l.pwd).collect()
    }
}
