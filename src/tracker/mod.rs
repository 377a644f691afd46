//! Task progress tracking: the per-user view of application tasks.
//!
//! A load reads three collections (task definitions, progress records,
//! guidance stages) and joins them into [`UserTaskView`]s. A toggle writes
//! one progress record and either confirms the local change or resyncs the
//! whole board from the store.

pub mod board;
pub mod fetch;
pub mod progress;
pub mod reconcile;
pub mod toggle;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{GuidanceStage, ProgressRecord, TaskDefinition};

pub use board::TaskBoard;
pub use fetch::{fetch_snapshot, Snapshot};
pub use progress::Progress;
pub use reconcile::reconcile;
pub use toggle::{ProgressWrite, ToggleOutcome};

/// Stage label for tasks whose guidance stage is unknown.
pub const FALLBACK_STAGE: &str = "General";

/// Whether a view reflects what the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Matches the last successful read or write.
    Confirmed,
    /// Changed locally; the write has not settled yet.
    Pending,
}

/// A task definition joined with the user's progress and its stage name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTaskView {
    /// Progress record id, or the deterministic id the record would get.
    pub id: String,
    /// Task definition id.
    pub task_id: String,
    /// Task title; empty when the definition has none.
    pub title: String,
    /// Task description.
    pub description: Option<String>,
    /// Whether the user completed the task.
    pub is_completed: bool,
    /// When the user completed the task.
    pub completed_date: Option<DateTime<Utc>>,
    /// When the task is due.
    pub due_date: Option<DateTime<Utc>>,
    /// Rough effort estimate, in hours.
    pub estimated_effort: Option<f64>,
    /// Whether the task can be skipped.
    pub is_optional: bool,
    /// Name of the guidance stage, when the stage is known.
    pub stage_name: Option<String>,
    /// Local sync state.
    pub sync: SyncState,
}

impl UserTaskView {
    /// Joins one task with the user's progress record and the task's stage.
    #[must_use]
    pub fn build(
        task: &TaskDefinition,
        progress: Option<&ProgressRecord>,
        stage: Option<&GuidanceStage>,
        user_id: &str,
    ) -> Self {
        let is_completed = progress.is_some_and(|p| p.is_completed);
        Self {
            id: progress
                .map_or_else(|| ProgressRecord::id_for(&task.id, user_id), |p| p.id.clone()),
            task_id: task.id.clone(),
            title: task.task_title.clone().unwrap_or_default(),
            description: task.description.clone(),
            is_completed,
            completed_date: progress.filter(|_| is_completed).and_then(|p| p.completed_date),
            due_date: task.due_date,
            estimated_effort: task.estimated_effort,
            is_optional: task.is_optional.unwrap_or(false),
            stage_name: stage.and_then(|s| s.stage_name.clone()),
            sync: SyncState::Confirmed,
        }
    }

    /// Stage name, or [`FALLBACK_STAGE`] when it is unknown.
    #[must_use]
    pub fn stage_label(&self) -> &str {
        self.stage_name.as_deref().unwrap_or(FALLBACK_STAGE)
    }

    /// Flips completion locally and marks the view pending.
    pub(crate) fn begin_toggle(&mut self, now: DateTime<Utc>) {
        self.is_completed = !self.is_completed;
        self.completed_date = self.is_completed.then_some(now);
        self.sync = SyncState::Pending;
    }

    /// Marks the pending change as stored under `record_id`.
    pub(crate) fn confirm(&mut self, record_id: String) {
        self.id = record_id;
        self.sync = SyncState::Confirmed;
    }
}
