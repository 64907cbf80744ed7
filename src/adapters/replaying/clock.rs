//! Replaying adapter for the `Clock` port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Serves recorded clock readings in order.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a clock over `replayer`.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = next_output(&self.replayer, "clock", "now");
        serde_json::from_value(output).expect("clock::now: recorded value is not a timestamp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    #[test]
    fn serves_readings_in_order() {
        let reading = |seq, ts: &str| Interaction {
            seq,
            port: "clock".into(),
            method: "now".into(),
            input: json!(null),
            output: json!(ts),
        };
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            recorder_version: "test".into(),
            interactions: vec![reading(0, "2024-01-01T00:00:00Z"), reading(1, "2024-01-01T00:01:00Z")],
        };
        let clock = ReplayingClock::new(CassetteReplayer::new(&cassette));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(first.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(second > first);
    }
}
