//! Build store: persistence for per-build revision records and changelogs.
//!
//! Stands in for the host CI system's build history when the binding runs
//! from the command line. All I/O goes through the `FileSystem` port.
//! Directory layout:
//!
//! ```text
//! <root>/
//!   └── builds/
//!       └── <n>/
//!           ├── revision.yaml
//!           └── changelog.txt
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::context::ServiceContext;
use crate::error::{PortError, StoreError};
use crate::ports::BuildRecord;
use crate::scm::revision::RevisionState;

/// Default store root, relative to the working directory.
pub const DEFAULT_ROOT: &str = ".sscm";

/// Environment variable overriding [`DEFAULT_ROOT`].
pub const ROOT_ENV: &str = "SSCM_STORE";

const REVISION_FILE: &str = "revision.yaml";
const CHANGELOG_FILE: &str = "changelog.txt";

/// Persistence layer for build records.
pub struct BuildStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> BuildStore<'a> {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// Highest build number with a directory in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the builds directory exists but cannot be listed.
    pub fn latest_build_number(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.build_numbers()?.into_iter().max())
    }

    /// Number the next build should use; builds start at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the builds directory cannot be listed.
    pub fn next_build_number(&self) -> Result<u32, StoreError> {
        Ok(self.latest_build_number()?.map_or(1, |n| n + 1))
    }

    /// Writes `revision` to `builds/<n>/revision.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_revision(&self, revision: &RevisionState) -> Result<(), StoreError> {
        let build = revision.build_number();
        let yaml = serde_yaml::to_string(revision)
            .map_err(|source| StoreError::Serialize { build, source })?;
        let path = self.build_dir(build).join(REVISION_FILE);
        self.ctx.fs.write(&path, &yaml).map_err(|source| StoreError::Write { path, source })?;
        debug!(build, "revision saved");
        Ok(())
    }

    /// Reads the revision recorded for `build`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read or parsed.
    pub fn load_revision(&self, build: u32) -> Result<Option<RevisionState>, StoreError> {
        let path = self.build_dir(build).join(REVISION_FILE);
        if !self.ctx.fs.exists(&path) {
            return Ok(None);
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|source| StoreError::Read { path: path.clone(), source })?;
        serde_yaml::from_str(&contents).map(Some).map_err(|source| StoreError::Parse { path, source })
    }

    /// Revision of the newest build that recorded one, or
    /// [`RevisionState::never_built`] when none did.
    ///
    /// Builds whose checkout failed before recording are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be read or parsed.
    pub fn latest_revision(&self) -> Result<RevisionState, StoreError> {
        let mut numbers = self.build_numbers()?;
        numbers.sort_unstable_by(|a, b| b.cmp(a));
        for build in numbers {
            if let Some(revision) = self.load_revision(build)? {
                return Ok(revision);
            }
        }
        Ok(RevisionState::never_built())
    }

    /// Where the changelog of `build` is captured.
    #[must_use]
    pub fn changelog_path(&self, build: u32) -> PathBuf {
        self.build_dir(build).join(CHANGELOG_FILE)
    }

    /// Opens a new build record numbered `number`, scheduled at `timestamp`.
    ///
    /// The previous build date is taken from the latest recorded revision.
    ///
    /// # Errors
    ///
    /// Returns an error if the build directory cannot be created or an
    /// earlier record cannot be read.
    pub fn begin_build(
        &self,
        number: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<StoredBuild<'_, 'a>, StoreError> {
        let previous = self.latest_revision()?;
        let previous = (previous.build_number() != 0).then(|| previous.date());
        let dir = self.build_dir(number);
        self.ctx.fs.create_dir_all(&dir).map_err(|source| StoreError::Write { path: dir, source })?;
        Ok(StoredBuild { store: self, number, timestamp, previous })
    }

    fn build_numbers(&self) -> Result<Vec<u32>, StoreError> {
        let dir = self.root.join("builds");
        if !self.ctx.fs.exists(&dir) {
            return Ok(Vec::new());
        }
        let entries =
            self.ctx.fs.list_dir(&dir).map_err(|source| StoreError::Read { path: dir, source })?;
        Ok(entries.iter().filter_map(|name| name.parse().ok()).collect())
    }

    fn build_dir(&self, build: u32) -> PathBuf {
        self.root.join("builds").join(build.to_string())
    }
}

/// A build backed by the store.
pub struct StoredBuild<'s, 'a> {
    store: &'s BuildStore<'a>,
    number: u32,
    timestamp: DateTime<Utc>,
    previous: Option<DateTime<Utc>>,
}

impl StoredBuild<'_, '_> {
    /// Where this build's changelog is captured.
    #[must_use]
    pub fn changelog_path(&self) -> PathBuf {
        self.store.changelog_path(self.number)
    }
}

impl BuildRecord for StoredBuild<'_, '_> {
    fn number(&self) -> u32 {
        self.number
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn previous_build_date(&self) -> Option<DateTime<Utc>> {
        self.previous
    }

    fn attach_revision(&mut self, revision: RevisionState) -> Result<(), PortError> {
        self.store.save_revision(&revision).map_err(Into::into)
    }
}
