//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::id_gen::LiveIdGenerator;
use crate::adapters::live::launcher::ProcessLauncher;
use crate::adapters::live::users::LocalUserDirectory;
use crate::adapters::recording::{RecordingClock, RecordingIdGenerator, RecordingLauncher};
use crate::adapters::replaying::{ReplayingClock, ReplayingIdGenerator, ReplayingLauncher};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;
use crate::ports::launcher::Launcher;
use crate::ports::users::UserDirectory;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// live, recording or replaying adapters. The filesystem and user directory
/// are always live: workspaces and changelog files are real on every path.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for config, build records and changelog sinks.
    pub fs: Box<dyn FileSystem>,
    /// Runs the `sscm` client.
    pub launcher: Box<dyn Launcher>,
    /// ID generator for scratch file names.
    pub id_gen: Box<dyn IdGenerator>,
    /// Resolves changelog authors.
    pub users: Box<dyn UserDirectory>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            launcher: Box::new(ProcessLauncher),
            id_gen: Box::new(LiveIdGenerator::new()),
            users: Box::new(LocalUserDirectory),
        }
    }

    /// Creates a live context whose clock, launcher and ID interactions are
    /// recorded into per-port cassettes under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(dir: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir)?;
        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), session.clock.clone())),
            fs: Box::new(LiveFileSystem),
            launcher: Box::new(RecordingLauncher::new(
                Box::new(ProcessLauncher),
                session.launcher.clone(),
            )),
            id_gen: Box::new(RecordingIdGenerator::new(
                Box::new(LiveIdGenerator::new()),
                session.id_gen.clone(),
            )),
            users: Box::new(LocalUserDirectory),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so per-port
    /// cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let replayer = || CassetteConfig::load_monolithic(path);
        Ok(Self {
            clock: Box::new(ReplayingClock::new(replayer()?)),
            fs: Box::new(LiveFileSystem),
            launcher: Box::new(ReplayingLauncher::new(replayer()?)),
            id_gen: Box::new(ReplayingIdGenerator::new(replayer()?)),
            users: Box::new(LocalUserDirectory),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use a panicking adapter that fails
    /// with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: Box::new(LiveFileSystem),
            launcher: match replayers.launcher {
                Some(r) => Box::new(ReplayingLauncher::new(r)),
                None => Box::new(PanickingLauncher),
            },
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => Box::new(PanickingIdGenerator),
            },
            users: Box::new(LocalUserDirectory),
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingLauncher;
impl Launcher for PanickingLauncher {
    fn launch(
        &self,
        _command: &crate::scm::command::CommandLine,
        _pwd: Option<&Path>,
        _stdout: &mut dyn std::io::Write,
    ) -> Result<i32, crate::error::PortError> {
        panic!("Launcher port not configured in CassetteConfig: no cassette loaded for launcher");
    }
}

struct PanickingIdGenerator;
impl IdGenerator for PanickingIdGenerator {
    fn generate_id(&self) -> String {
        panic!("IdGenerator port not configured in CassetteConfig: no cassette loaded for id_gen");
    }
}
