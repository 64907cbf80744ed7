//! Cassettes: recorded port interactions replayed in tests.
//!
//! A recording session wraps the live clock, launcher and ID generator and
//! appends every call to a YAML cassette. Replaying adapters serve those
//! calls back in order, so a captured `sscm` session can drive checkout and
//! polling deterministically.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
