//! Time windows passed to the client's `-d` and `-s` flags.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::scm::config::TimestampZone;

/// Format of each side of a `-d` change range.
pub const RANGE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Format of the `-s` fetch cutoff.
pub const CUTOFF_FORMAT: &str = "%Y%m%d%H:%M:%S";

/// A window whose start lies after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("window start {start} is after end {end}")]
pub struct InvertedWindow {
    /// Requested start.
    pub start: DateTime<Utc>,
    /// Requested end.
    pub end: DateTime<Utc>,
}

/// A closed interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns [`InvertedWindow`] when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvertedWindow> {
        if start > end {
            return Err(InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a window ending at `end`, pulling `start` back to `end` if it lies later.
    ///
    /// A baseline recorded after the current clock reading (clock skew between
    /// agents) yields an empty window instead of a nonsensical range.
    #[must_use]
    pub fn up_to(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start: start.min(end), end }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Renders `yyyyMMddHHmmss:yyyyMMddHHmmss` in the given zone.
    #[must_use]
    pub fn format_range(&self, zone: TimestampZone) -> String {
        format!("{}:{}", zone.format(self.start, RANGE_FORMAT), zone.format(self.end, RANGE_FORMAT))
    }
}

/// Renders a fetch cutoff as `yyyyMMddHH:mm:ss` in the given zone.
#[must_use]
pub fn format_cutoff(at: DateTime<Utc>, zone: TimestampZone) -> String {
    zone.format(at, CUTOFF_FORMAT)
}
