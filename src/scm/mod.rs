//! Surround SCM binding: command lines, configuration, polling and checkout.
//!
//! [`SurroundScm`] is the entry point the host drives. The submodules hold
//! the pieces it sequences: [`command`] builds `sscm` argument lists,
//! [`window`] formats time ranges, [`volume`] turns a change count into a
//! [`PollingVerdict`], and [`revision`] is the baseline persisted per build.

pub mod command;
pub mod config;
pub mod revision;
pub mod surround;
pub mod volume;
pub mod window;

pub use command::{change_list_command, fetch_command, Arg, ChangeListMode, CommandLine};
pub use config::{ConnectionConfig, PollingPolicy, ScmConfig, TimestampZone, DISPLAY_NAME};
pub use revision::RevisionState;
pub use surround::{calc_revision_state, CheckoutOutcome, CheckoutStage, SurroundScm};
pub use volume::{ChangeVolumeEvaluator, CountFallback, PollingVerdict, CHANGES_THRESHOLD};
pub use window::TimeWindow;
