//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod store;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::StoreError;

pub use clock::ReplayingClock;
pub use store::ReplayingStore;

/// Replayer shared by every adapter of one replaying context.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Takes the recorded output of the next `port`/`method` call.
pub(crate) fn next_output(replayer: &SharedReplayer, port: &str, method: &str) -> Value {
    replayer.lock().expect("replayer lock poisoned").next_interaction(port, method).output
}

/// Decodes an `{"Ok": value}` / `{"Err": message}` output.
///
/// # Panics
///
/// Panics when the output does not follow the convention or the `Ok` value
/// does not decode as `T`; either means the cassette does not match the code.
pub(crate) fn replay_result<T: DeserializeOwned>(
    method: &str,
    output: Value,
) -> Result<T, StoreError> {
    if let Some(message) = output.get("Err") {
        return Err(StoreError::Replayed(message.as_str().unwrap_or_default().to_string()));
    }
    let value = output
        .get("Ok")
        .cloned()
        .unwrap_or_else(|| panic!("{method}: recorded output is neither Ok nor Err: {output}"));
    Ok(serde_json::from_value(value)
        .unwrap_or_else(|e| panic!("{method}: recorded Ok value does not decode: {e}")))
}
