//! Port implementations.
//!
//! - `live`: the real process, clock, disk and console.
//! - `recording`: wraps live adapters and appends calls to cassettes.
//! - `replaying`: serves calls back from cassettes.

pub mod live;
pub mod recording;
pub mod replaying;
