//! Parser for `sscm cc` exports.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, error, warn};

use super::entry::{Author, ChangeEntry};
use super::scanner::FieldCursor;
use super::set::ChangeSet;
use crate::ports::{FileSystem, UserDirectory};

/// Prefix of the line the client prints when nothing changed.
pub const NO_CHANGES_MARKER: &str = "total-0";

/// Turns an export into a [`ChangeSet`].
///
/// Parsing never fails. A truncated record ends the parse and keeps every
/// entry read before it; an unreadable source yields an empty set.
pub struct ChangelogParser<'a> {
    users: &'a dyn UserDirectory,
}

impl<'a> ChangelogParser<'a> {
    /// Creates a parser that resolves authors through `users`.
    #[must_use]
    pub fn new(users: &'a dyn UserDirectory) -> Self {
        Self { users }
    }

    /// Parses an export read from `reader`.
    pub fn parse<R: BufRead + ?Sized>(&self, build_number: u32, reader: &mut R) -> ChangeSet {
        let mut set = ChangeSet::empty(build_number);
        let mut buf = Vec::new();
        let mut header_skipped = false;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, entries = set.len(), "changelog read failed; keeping entries so far");
                    break;
                }
            }
            if !header_skipped {
                header_skipped = true;
                continue;
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if line.starts_with(NO_CHANGES_MARKER) {
                break;
            }
            let Some(entry) = self.parse_record(line) else {
                debug!(line, entries = set.len(), "truncated changelog record; stopping");
                break;
            };
            set.push(entry);
        }

        set
    }

    /// Parses the export stored at `path`.
    ///
    /// The file is closed on every return path. A file that cannot be opened
    /// is logged and treated as containing no changes.
    pub fn parse_file(&self, fs: &dyn FileSystem, build_number: u32, path: &Path) -> ChangeSet {
        match fs.open(path) {
            Ok(mut reader) => self.parse(build_number, &mut reader),
            Err(err) => {
                error!(path = %path.display(), error = %err, "cannot open changelog; assuming no changes");
                ChangeSet::empty(build_number)
            }
        }
    }

    fn parse_record(&self, line: &str) -> Option<ChangeEntry> {
        let [path, name, version, action, date, comment, user] = FieldCursor::new(line).record()?;
        let author = self.users.resolve(user).map_or(Author::Unknown, Author::Known);
        Some(ChangeEntry::new(
            format!("{path}/{name}"),
            version.to_string(),
            action.to_string(),
            comment.to_string(),
            date.to_string(),
            author,
        ))
    }
}
