//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod id_gen;
pub mod launcher;

pub use clock::RecordingClock;
pub use id_gen::RecordingIdGenerator;
pub use launcher::RecordingLauncher;

use serde::Serialize;
use tracing::warn;

use crate::cassette::session::SharedRecorder;

/// Records an infallible call.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    match (serde_json::to_value(input), serde_json::to_value(output)) {
        (Ok(input), Ok(output)) => push(recorder, port, method, input, output),
        (Err(err), _) | (_, Err(err)) => {
            warn!(port, method, error = %err, "interaction not recorded");
        }
    }
}

/// Records a fallible call as `{"ok": v}` or `{"err": "message"}`.
pub(crate) fn record_result<I, T, E>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    I: Serialize,
    T: Serialize,
    E: std::fmt::Display,
{
    let output = match result {
        Ok(value) => serde_json::to_value(value).map(|v| serde_json::json!({ "ok": v })),
        Err(err) => Ok(serde_json::json!({ "err": err.to_string() })),
    };
    match (serde_json::to_value(input), output) {
        (Ok(input), Ok(output)) => push(recorder, port, method, input, output),
        (Err(err), _) | (_, Err(err)) => {
            warn!(port, method, error = %err, "interaction not recorded");
        }
    }
}

fn push(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(_) => warn!(port, method, "recorder lock poisoned; interaction dropped"),
    }
}
