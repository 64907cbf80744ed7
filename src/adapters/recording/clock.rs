//! Recording adapter for the `Clock` port.

use chrono::{DateTime, Utc};

use super::record_interaction;
use crate::cassette::session::SharedRecorder;
use crate::ports::Clock;

/// Records every reading of an inner clock.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: SharedRecorder,
}

impl RecordingClock {
    /// Wraps `inner`.
    pub fn new(inner: Box<dyn Clock>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.inner.now();
        record_interaction(&self.recorder, "clock", "now", &(), &now);
        now
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::live::clock::LiveClock;
    use crate::cassette::format::Cassette;
    use crate::cassette::recorder::CassetteRecorder;

    #[test]
    fn records_now_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));

        let read = {
            let clock = RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder));
            clock.now()
        };

        Arc::try_unwrap(recorder).unwrap().into_inner().unwrap().finish().unwrap();
        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        let replayed: DateTime<Utc> =
            serde_json::from_value(cassette.interactions[0].output.clone()).unwrap();
        assert_eq!(replayed, read);
    }
}
