//! Adapters implementing the port traits.
//!
//! - `live`: real clock and HTTP collection store.
//! - `local`: in-memory and JSON-directory collection stores.
//! - `recording` / `replaying`: cassette capture and playback.

pub mod live;
pub mod local;
pub mod recording;
pub mod replaying;
