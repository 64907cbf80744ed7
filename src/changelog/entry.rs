//! One changed file in a changelog.

use std::fmt;

use serde::Serialize;

use crate::ports::User;

/// How a file was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditType {
    /// File added.
    Add,
    /// File modified, or any action word other than add/delete.
    Edit,
    /// File removed.
    Delete,
}

impl EditType {
    /// Maps a free-text action word, case-insensitively.
    ///
    /// Only `delete` and `add` are recognized; everything else (including
    /// `move`, `rename` and the empty string) is an edit.
    #[must_use]
    pub fn from_action(action: &str) -> Self {
        if action.eq_ignore_ascii_case("delete") {
            Self::Delete
        } else if action.eq_ignore_ascii_case("add") {
            Self::Add
        } else {
            Self::Edit
        }
    }
}

impl fmt::Display for EditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        })
    }
}

/// Who made a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Author {
    /// Resolved through the user directory.
    Known(User),
    /// Name absent or not resolvable.
    Unknown,
}

impl Author {
    /// Name for reports; `unknown` when unresolved.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Known(user) => &user.display_name,
            Self::Unknown => "unknown",
        }
    }
}

/// A single changelog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    affected_file: String,
    version: String,
    action: String,
    edit_type: EditType,
    comment: String,
    date: String,
    author: Author,
}

impl ChangeEntry {
    /// Builds an entry; `affected_file` is `<path>/<name>`.
    #[must_use]
    pub fn new(
        affected_file: String,
        version: String,
        action: String,
        comment: String,
        date: String,
        author: Author,
    ) -> Self {
        let edit_type = EditType::from_action(&action);
        Self { affected_file, version, action, edit_type, comment, date, author }
    }

    /// Repository path of the changed file.
    #[must_use]
    pub fn affected_file(&self) -> &str {
        &self.affected_file
    }

    /// Alias of [`ChangeEntry::affected_file`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.affected_file
    }

    /// Alias of [`ChangeEntry::affected_file`].
    #[must_use]
    pub fn path(&self) -> &str {
        &self.affected_file
    }

    /// All paths touched by this entry.
    #[must_use]
    pub fn affected_paths(&self) -> Vec<&str> {
        vec![self.affected_file.as_str()]
    }

    /// Version token as printed by the client.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Action word as printed by the client.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Normalized action.
    #[must_use]
    pub fn edit_type(&self) -> EditType {
        self.edit_type
    }

    /// Check-in comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Date in the client's own format; not reparsed.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Author of the change.
    #[must_use]
    pub fn author(&self) -> &Author {
        &self.author
    }

    /// `File: {f} Action: {a} Version: {v} Comment: {c}`
    #[must_use]
    pub fn display_message(&self) -> String {
        format!(
            "File: {} Action: {} Version: {} Comment: {}",
            self.affected_file, self.action, self.version, self.comment
        )
    }

    /// Short annotated form: the affected file.
    #[must_use]
    pub fn msg_annotated(&self) -> &str {
        &self.affected_file
    }
}
