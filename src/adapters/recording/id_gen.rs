//! Recording adapter for the `IdGenerator` port.

use super::record_interaction;
use crate::cassette::session::SharedRecorder;
use crate::ports::IdGenerator;

/// Records every ID handed out by an inner generator.
pub struct RecordingIdGenerator {
    inner: Box<dyn IdGenerator>,
    recorder: SharedRecorder,
}

impl RecordingIdGenerator {
    /// Wraps `inner`.
    pub fn new(inner: Box<dyn IdGenerator>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl IdGenerator for RecordingIdGenerator {
    fn generate_id(&self) -> String {
        let id = self.inner.generate_id();
        record_interaction(&self.recorder, "id_gen", "generate_id", &(), &id);
        id
    }
}
