//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the task tracker and something it does
//! not own: wall-clock time and the collection store holding every record.
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod store;

pub use clock::Clock;
pub use store::{CollectionStore, Page, Query, StoreFuture};
