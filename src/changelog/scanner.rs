//! Field scanner for one export record.

/// Number of fields in a record.
pub const FIELD_COUNT: usize = 7;

/// Cursor over the unread remainder of a record line.
///
/// A field is one opening character (normally `<`) followed by text up to
/// the next `>`. The cursor resumes right after that `>`.
#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    rest: &'a str,
}

impl<'a> FieldCursor<'a> {
    /// Starts at the beginning of `line`.
    #[must_use]
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Takes the next field, or `None` when the line is truncated.
    ///
    /// Truncated means there is no further `>`, or the remainder starts with
    /// `>` (no opening character).
    pub fn next_field(&mut self) -> Option<&'a str> {
        let end = self.rest.find('>')?;
        if end == 0 {
            return None;
        }
        let open_len = self.rest.chars().next().map_or(0, char::len_utf8);
        let field = &self.rest[open_len..end];
        self.rest = &self.rest[end + 1..];
        Some(field)
    }

    /// Takes all seven fields, or `None` if any is truncated.
    pub fn record(&mut self) -> Option<[&'a str; FIELD_COUNT]> {
        let mut fields = [""; FIELD_COUNT];
        for slot in &mut fields {
            *slot = self.next_field()?;
        }
        Some(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fields_in_sequence() {
        let mut cursor = FieldCursor::new("<src><A.txt><1>");
        assert_eq!(cursor.next_field(), Some("src"));
        assert_eq!(cursor.next_field(), Some("A.txt"));
        assert_eq!(cursor.next_field(), Some("1"));
        assert_eq!(cursor.next_field(), None);
    }

    #[test]
    fn empty_field_is_allowed() {
        let mut cursor = FieldCursor::new("<><x>");
        assert_eq!(cursor.next_field(), Some(""));
        assert_eq!(cursor.next_field(), Some("x"));
    }

    #[test]
    fn leading_close_bracket_is_truncation() {
        let mut cursor = FieldCursor::new("><x>");
        assert_eq!(cursor.next_field(), None);
    }

    #[test]
    fn missing_close_bracket_is_truncation() {
        let mut cursor = FieldCursor::new("<src");
        assert_eq!(cursor.next_field(), None);
    }

    #[test]
    fn full_record() {
        let mut cursor = FieldCursor::new("<p><n><v><a><d><c><u>");
        assert_eq!(cursor.record(), Some(["p", "n", "v", "a", "d", "c", "u"]));
    }

    #[test]
    fn six_fields_is_not_a_record() {
        let mut cursor = FieldCursor::new("<p><n><v><a><d><c><u");
        assert_eq!(cursor.record(), None);
    }

    #[test]
    fn multibyte_opening_character() {
        let mut cursor = FieldCursor::new("«dir>");
        assert_eq!(cursor.next_field(), Some("dir"));
    }

    #[test]
    fn comment_may_contain_open_bracket() {
        let mut cursor = FieldCursor::new("<a < b>");
        assert_eq!(cursor.next_field(), Some("a < b"));
    }
}
