//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Shared handle to one port's recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Per-port recorders writing into one timestamped directory.
pub struct RecordingSession {
    /// Recorder for clock interactions.
    pub clock: SharedRecorder,
    /// Recorder for launcher interactions.
    pub launcher: SharedRecorder,
    /// Recorder for ID generator interactions.
    pub id_gen: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates `<base>/<timestamp>/` and a recorder per port inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"))))
        };

        Ok(Self {
            clock: make_recorder("clock"),
            launcher: make_recorder("launcher"),
            id_gen: make_recorder("id_gen"),
            output_dir,
        })
    }

    /// Directory holding this session's cassettes.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every cassette and returns the session directory.
    ///
    /// The context that used this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        for (port, shared) in [("clock", self.clock), ("launcher", self.launcher), ("id_gen", self.id_gen)]
        {
            let recorder = Arc::try_unwrap(shared)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
        }
        Ok(self.output_dir)
    }
}
