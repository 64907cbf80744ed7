//! `surround-scm changelog` command.

use std::path::Path;

use crate::changelog::ChangelogParser;
use crate::context::ServiceContext;

/// Execute the `changelog` command.
///
/// Prints one line per entry, or `No changes.` for an empty (or missing) export.
///
/// # Errors
///
/// Never fails; unreadable input is reported as having no changes.
pub fn run(ctx: &ServiceContext, file: &Path, build: u32) -> Result<(), String> {
    let changes = ChangelogParser::new(ctx.users.as_ref()).parse_file(ctx.fs.as_ref(), build, file);
    if changes.is_empty_set() {
        println!("No changes.");
        return Ok(());
    }
    for entry in &changes {
        println!("{}  [{} by {}]", entry.display_message(), entry.edit_type(), entry.author().display_name());
    }
    Ok(())
}
