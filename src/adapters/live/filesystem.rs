//! Live filesystem adapter using `std::fs`.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        ensure_parent(path)?;
        Ok(fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            if let Some(name) = entry?.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn create(&self, path: &Path) -> Result<Box<dyn Write + Send>, PortError> {
        ensure_parent(path)?;
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }

    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + Send>, PortError> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(fs::create_dir_all(path)?)
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        Ok(fs::remove_file(path)?)
    }
}
