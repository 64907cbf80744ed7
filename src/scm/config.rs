//! Connection and polling configuration.
//!
//! A config is an explicit value handed to every operation; nothing here is
//! process-global. It is usually loaded from YAML:
//!
//! ```yaml
//! server: scm.example.com
//! server_port: 4900
//! user_name: builder
//! branch: Mainline
//! repository: Mainline/Product
//! executable: /opt/sscm/bin/sscm
//! timestamp_zone: local
//! polling:
//!   on_unreadable_count: assume_many
//! ```

use std::path::Path;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::ports::FileSystem;
use crate::scm::volume::CountFallback;
use crate::secret::Secret;

/// Name shown for this SCM in host configuration screens.
pub const DISPLAY_NAME: &str = "Surround SCM";

/// Client executable used when none is configured.
pub const DEFAULT_EXECUTABLE: &str = "sscm";

/// Environment variable that overrides the configured password.
pub const PASSWORD_ENV: &str = "SSCM_PASSWORD";

/// Wall-clock zone used when rendering timestamps for the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampZone {
    /// The zone of the machine running the client.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
}

impl TimestampZone {
    /// Formats `at` with a `chrono` format string in this zone.
    #[must_use]
    pub fn format(self, at: DateTime<Utc>, fmt: &str) -> String {
        match self {
            Self::Local => at.with_timezone(&Local).format(fmt).to_string(),
            Self::Utc => at.format(fmt).to_string(),
        }
    }
}

/// Where and as whom to reach the Surround server.
///
/// Fields are concatenated into client arguments without quoting. A `:` in
/// the user name or a space in any field is passed through as-is and the
/// client may misread it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server host name.
    pub server: String,
    /// Server port.
    pub server_port: u16,
    /// Login name.
    pub user_name: String,
    /// Login password; may come from [`PASSWORD_ENV`] instead.
    #[serde(default)]
    pub password: Secret,
    /// Branch to fetch and inspect.
    pub branch: String,
    /// Repository path within the branch.
    pub repository: String,
    /// Path to the client executable.
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Zone used for `-d` and `-s` timestamps.
    #[serde(default)]
    pub timestamp_zone: TimestampZone,
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

impl ConnectionConfig {
    /// Builds a connection with the default executable and local timestamps.
    #[must_use]
    pub fn new(
        server: impl Into<String>,
        server_port: u16,
        user_name: impl Into<String>,
        password: Secret,
        branch: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            server_port,
            user_name: user_name.into(),
            password,
            branch: branch.into(),
            repository: repository.into(),
            executable: default_executable(),
            timestamp_zone: TimestampZone::default(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::Missing("server"));
        }
        if self.user_name.trim().is_empty() {
            return Err(ConfigError::Missing("user_name"));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Missing("password"));
        }
        if self.branch.trim().is_empty() {
            return Err(ConfigError::Missing("branch"));
        }
        if self.repository.trim().is_empty() {
            return Err(ConfigError::Missing("repository"));
        }
        if self.executable.trim().is_empty() {
            return Err(ConfigError::Missing("executable"));
        }
        Ok(())
    }

    fn warn_on_unescaped_delimiters(&self) {
        if self.user_name.contains(':') {
            warn!(user = %self.user_name, "user name contains ':' and will be split by the client");
        }
        for (field, value) in [
            ("user_name", &self.user_name),
            ("branch", &self.branch),
            ("repository", &self.repository),
        ] {
            if value.contains(' ') {
                warn!(field, "value contains a space and is passed to the client unquoted");
            }
        }
    }
}

/// Polling behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingPolicy {
    /// Count assumed when the client's total line is missing or unreadable.
    #[serde(default)]
    pub on_unreadable_count: CountFallback,
}

/// Full configuration for one SCM instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmConfig {
    /// Connection and credentials.
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    /// Polling behaviour.
    #[serde(default)]
    pub polling: PollingPolicy,
}

impl ScmConfig {
    /// Wraps a connection with the default polling policy.
    #[must_use]
    pub fn new(connection: ConnectionConfig) -> Self {
        Self { connection, polling: PollingPolicy::default() }
    }

    /// Parses a YAML document, applies `password_override`, and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a required field is blank,
    /// or neither the file nor the override supplies a password.
    pub fn from_yaml(
        yaml: &str,
        origin: &Path,
        password_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(yaml)
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })?;
        if let Some(password) = password_override.filter(|p| !p.is_empty()) {
            config.connection.password = Secret::new(password);
        }
        config.connection.validate()?;
        config.connection.warn_on_unescaped_delimiters();
        Ok(config)
    }

    /// Loads a config file through the filesystem port.
    ///
    /// The password is taken from [`PASSWORD_ENV`] when that variable is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs
            .read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml(&yaml, path, std::env::var(PASSWORD_ENV).ok())
    }
}
