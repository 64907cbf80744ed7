//! Error types for configuration, persistence and tool invocation.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while loading an [`ScmConfig`](crate::scm::ScmConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },
    /// The configuration file is not valid YAML for the expected shape.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// A required field was empty after applying environment overrides.
    #[error("config field `{0}` is required")]
    Missing(&'static str),
}

/// Failures reading or writing persisted build records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Record path.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },
    /// A record could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Record path.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },
    /// A record exists but could not be decoded.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Record path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// A revision could not be encoded.
    #[error("failed to serialize revision for build {build}: {source}")]
    Serialize {
        /// Build number being saved.
        build: u32,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failures running the `sscm` client or handling its output sink.
#[derive(Debug, Error)]
pub enum ScmError {
    /// The process could not be started or its output could not be copied.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        /// Masked command line.
        command: String,
        /// Underlying port error.
        #[source]
        source: PortError,
    },
    /// The process ran but exited nonzero.
    #[error("`{command}` exited with code {code}")]
    Exit {
        /// Masked command line.
        command: String,
        /// Exit code reported by the process.
        code: i32,
    },
    /// The host refused the revision record.
    #[error("failed to record revision for build {build}: {source}")]
    Record {
        /// Build the record was meant for.
        build: u32,
        /// Underlying port error.
        #[source]
        source: PortError,
    },
    /// The output sink could not be created or flushed.
    #[error("changelog sink {path}: {source}")]
    Sink {
        /// Sink path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
