//! `surround-scm checkout` command.

use std::path::Path;

use crate::adapters::live::listener::ConsoleListener;
use crate::context::ServiceContext;
use crate::scm::{CheckoutOutcome, SurroundScm};
use crate::store::BuildStore;

/// Execute the `checkout` command.
///
/// Allocates the next build number in the store, fetches the branch into
/// `workspace`, records the new baseline and prints the captured changes.
///
/// # Errors
///
/// Returns an error string if the config or store cannot be read, or if the
/// checkout fails at any step.
pub fn run(ctx: &ServiceContext, config: &Path, workspace: &Path) -> Result<(), String> {
    let config = super::load_config(ctx, config)?;
    let store = BuildStore::new(ctx, &super::store_root());
    let number = store.next_build_number().map_err(|e| e.to_string())?;
    let mut build = store.begin_build(number, ctx.clock.now()).map_err(|e| e.to_string())?;
    let changelog = build.changelog_path();

    let scm = SurroundScm::new(config);
    match scm.checkout(ctx, &mut build, workspace, &changelog, &ConsoleListener) {
        CheckoutOutcome::Done { changes, .. } => {
            println!("Build #{number}: {} change(s)", changes.len());
            for entry in &changes {
                println!("  {}", entry.display_message());
            }
            Ok(())
        }
        CheckoutOutcome::Failed { stage, error } => {
            Err(format!("Build #{number}: checkout failed at {stage:?}: {error}"))
        }
    }
}
