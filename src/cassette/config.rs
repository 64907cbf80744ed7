//! Per-port cassette selection for replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Cassette file to replay for each recordable port.
///
/// A port left as `None` panics if it is called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the clock port.
    pub clock: Option<PathBuf>,
    /// Cassette for the launcher port.
    pub launcher: Option<PathBuf>,
    /// Cassette for the ID generator port.
    pub id_gen: Option<PathBuf>,
}

/// Loaded replayers, one per configured port.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the launcher port.
    pub launcher: Option<CassetteReplayer>,
    /// Replayer for the ID generator port.
    pub id_gen: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// A config with no cassettes; every replayed port panics when called.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Uses the `<port>.cassette.yaml` files a recording session wrote into `dir`.
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.exists().then_some(path)
        };
        Self { clock: existing("clock"), launcher: existing("launcher"), id_gen: existing("id_gen") }
    }

    /// Loads one cassette file into a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_monolithic(path: &Path) -> Result<CassetteReplayer, String> {
        Cassette::load(path).map(|cassette| CassetteReplayer::new(&cassette))
    }

    /// Loads every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| path.as_deref().map(Self::load_monolithic).transpose();
        Ok(PortReplayers {
            clock: load(&self.clock)?,
            launcher: load(&self.launcher)?,
            id_gen: load(&self.id_gen)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn session_dir_picks_up_only_existing_cassettes() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = CassetteRecorder::new(dir.path().join("launcher.cassette.yaml"), "x");
        recorder.record("launcher", "launch", json!({}), json!({"ok": {"exit_code": 0}}));
        recorder.finish().unwrap();

        let config = CassetteConfig::from_session_dir(dir.path());
        assert!(config.launcher.is_some());
        assert!(config.clock.is_none());
        assert!(config.id_gen.is_none());

        let replayers = config.load_all().unwrap();
        assert!(replayers.launcher.is_some());
        assert!(replayers.clock.is_none());
    }

    #[test]
    fn load_all_fails_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.cassette.yaml");
        std::fs::write(&path, "not: [valid").unwrap();
        let config = CassetteConfig { clock: Some(path), ..CassetteConfig::default() };
        assert!(config.load_all().is_err());
    }
}
