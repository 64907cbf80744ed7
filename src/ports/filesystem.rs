//! Filesystem port for file I/O operations.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::PortError;

/// Provides filesystem access for config, build records and changelog sinks.
///
/// Handles returned by [`FileSystem::create`] and [`FileSystem::open`] close
/// when dropped, so every exit path of a caller releases them.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating parents and overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the entry names in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError>;

    /// Creates (or truncates) a file for streaming writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directories cannot be created.
    fn create(&self, path: &Path) -> Result<Box<dyn Write + Send>, PortError>;

    /// Opens a file for buffered streaming reads.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + Send>, PortError>;

    /// Creates a directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), PortError>;

    /// Removes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), PortError>;
}
