//! Record types for the collections the tracker reads and writes.
//!
//! Field names follow the store's camelCase schema. Every record carries its
//! identifier in `_id`.

pub mod fields;
pub mod guidance;
pub mod task;
pub mod university;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub use guidance::GuidanceStage;
pub use task::{ProgressRecord, TaskDefinition};
pub use university::University;

/// Collection holding task definitions.
pub const TASKS: &str = "applicationtasks";
/// Collection holding per-user progress records.
pub const PROGRESS: &str = "usertaskprogress";
/// Collection holding guidance stages.
pub const GUIDANCE: &str = "applicationguidance";
/// Collection holding universities.
pub const UNIVERSITIES: &str = "universities";

/// Decodes raw records, skipping (and logging) the ones that do not fit `T`.
#[must_use]
pub fn decode_all<T: DeserializeOwned>(collection: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(collection, error = %e, "skipping malformed record");
                None
            }
        })
        .collect()
}
