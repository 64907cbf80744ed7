//! `surround-scm poll` command.

use std::path::Path;

use crate::adapters::live::listener::ConsoleListener;
use crate::context::ServiceContext;
use crate::scm::SurroundScm;
use crate::store::BuildStore;

/// Execute the `poll` command.
///
/// Prints `NO_CHANGES`, `SIGNIFICANT` or `BUILD_NOW` as the last line.
///
/// # Errors
///
/// Returns an error string if the config or the latest revision cannot be read.
pub fn run(ctx: &ServiceContext, config: &Path) -> Result<(), String> {
    let config = super::load_config(ctx, config)?;
    let store = BuildStore::new(ctx, &super::store_root());
    let baseline = store.latest_revision().map_err(|e| e.to_string())?;
    if baseline.build_number() == 0 {
        println!("Never been built.");
    }

    let verdict = SurroundScm::new(config).compute_polling_verdict(ctx, &baseline, &ConsoleListener);
    println!("{verdict}");
    Ok(())
}
