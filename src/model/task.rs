//! Task definitions and per-user progress records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fields::{null_as_default, optional_date};

/// One actionable step of the application process. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub task_title: Option<String>,
    /// Longer explanation.
    pub description: Option<String>,
    /// When the task should be done by.
    #[serde(default, with = "optional_date")]
    pub due_date: Option<DateTime<Utc>>,
    /// Rough effort estimate, in hours.
    pub estimated_effort: Option<f64>,
    /// Whether the task can be skipped.
    pub is_optional: Option<bool>,
    /// Guidance stage this task belongs to.
    pub application_guidance_id: Option<String>,
    /// Link to supporting material.
    pub resource_link: Option<String>,
}

/// Mutable completion state of one task for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Task this record tracks.
    pub task_id: String,
    /// Completion flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
    /// When the task was completed; absent while incomplete.
    #[serde(default, with = "optional_date")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// Deterministic id of the progress record for `(task_id, user_id)`.
    ///
    /// Used both as the placeholder id of untouched views and as the id of
    /// newly created records, so repeated creates collide instead of duplicating.
    #[must_use]
    pub fn id_for(task_id: &str, user_id: &str) -> String {
        format!("progress-{task_id}-{user_id}")
    }
}
