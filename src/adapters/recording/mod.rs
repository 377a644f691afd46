//! Recording adapters that capture interactions to cassettes.
//!
//! Each adapter delegates to an inner port and appends what it saw to a
//! shared `CassetteRecorder`.

pub mod clock;
pub mod store;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use clock::RecordingClock;
pub use store::RecordingStore;

/// Recorder shared by every adapter of one recording context.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

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
    let input = serde_json::to_value(input).expect("failed to serialize recording input");
    let output = serde_json::to_value(output).expect("failed to serialize recording output");
    recorder.lock().expect("recorder lock poisoned").record(port, method, input, output);
}

/// Records a fallible call as `{"Ok": value}` or `{"Err": message}`.
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
        Ok(value) => serde_json::json!({
            "Ok": serde_json::to_value(value).expect("failed to serialize Ok value")
        }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };
    let input = serde_json::to_value(input).expect("failed to serialize recording input");
    recorder.lock().expect("recorder lock poisoned").record(port, method, input, output);
}
