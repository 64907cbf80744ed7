//! Ordered changes belonging to one build.

use serde::Serialize;

use super::entry::ChangeEntry;

/// Entries in export order, owned by a single build.
///
/// An empty set is a valid result meaning "nothing changed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    build_number: u32,
    entries: Vec<ChangeEntry>,
}

impl ChangeSet {
    /// An empty set for `build_number`.
    #[must_use]
    pub fn empty(build_number: u32) -> Self {
        Self { build_number, entries: Vec::new() }
    }

    pub(crate) fn push(&mut self, entry: ChangeEntry) {
        self.entries.push(entry);
    }

    /// Build this set belongs to.
    #[must_use]
    pub fn build_number(&self) -> u32 {
        self.build_number
    }

    /// `true` when no change was recorded.
    #[must_use]
    pub fn is_empty_set(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Alias of [`ChangeSet::is_empty_set`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in export order.
    #[must_use]
    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    /// Iterates entries in export order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChangeEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
