//! `surround-scm show-command` command.

use std::path::Path;

use crate::cli::CommandKind;
use crate::context::ServiceContext;
use crate::scm::{change_list_command, fetch_command, ChangeListMode, TimeWindow};
use crate::store::BuildStore;

/// Execute the `show-command` command.
///
/// Prints the masked command line without running it. `changes` uses the
/// window since the latest recorded build.
///
/// # Errors
///
/// Returns an error string if the config or the latest revision cannot be read.
pub fn run(
    ctx: &ServiceContext,
    config: &Path,
    kind: CommandKind,
    workspace: &Path,
) -> Result<(), String> {
    let config = super::load_config(ctx, config)?;
    let now = ctx.clock.now();
    let command = match kind {
        CommandKind::Fetch => fetch_command(&config.connection, workspace, now),
        CommandKind::Changes => {
            let store = BuildStore::new(ctx, &super::store_root());
            let baseline = store.latest_revision().map_err(|e| e.to_string())?;
            let window = TimeWindow::up_to(baseline.date(), now);
            change_list_command(&config.connection, &window, ChangeListMode::Full)
        }
    };
    println!("{command}");
    Ok(())
}
