//! Host build port.

use chrono::{DateTime, Utc};

use crate::error::PortError;
use crate::scm::revision::RevisionState;

/// The build a checkout runs for, as the host CI system sees it.
pub trait BuildRecord {
    /// Build number assigned by the host.
    fn number(&self) -> u32;

    /// When this build was scheduled.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Timestamp of the previous build of the same job, if any ran.
    fn previous_build_date(&self) -> Option<DateTime<Utc>>;

    /// Attaches the baseline the next poll will read.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot store the record.
    fn attach_revision(&mut self, revision: RevisionState) -> Result<(), PortError>;
}
