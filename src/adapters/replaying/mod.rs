//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod id_gen;
pub mod launcher;

pub use clock::ReplayingClock;
pub use id_gen::ReplayingIdGenerator;
pub use launcher::ReplayingLauncher;

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;

/// Takes the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the cassette cannot serve the call or the lock is poisoned;
/// either means the run diverged from the recording.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    replayer.lock().expect("replayer lock poisoned").next_output(port, method)
}
