//! Live adapters for real external interactions.

pub mod clock;
pub mod http_store;

pub use clock::LiveClock;
pub use http_store::HttpStore;
