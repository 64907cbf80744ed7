//! Baseline recorded after each successful fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When, and for which build, the workspace was last synchronized.
///
/// Copy semantics make every handed-out value independent: nothing a caller
/// does with a returned date can reach back into the state. Persisted with
/// `build_date` as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionState {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    build_date: DateTime<Utc>,
    build_number: u32,
}

impl RevisionState {
    /// Captures a baseline.
    #[must_use]
    pub fn new(build_date: DateTime<Utc>, build_number: u32) -> Self {
        Self { build_date, build_number }
    }

    /// Baseline used when no build has ever run: epoch zero, build 0.
    #[must_use]
    pub fn never_built() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH, 0)
    }

    /// Moment the workspace was synchronized.
    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.build_date
    }

    /// Build that recorded this state.
    #[must_use]
    pub fn build_number(&self) -> u32 {
        self.build_number
    }
}
