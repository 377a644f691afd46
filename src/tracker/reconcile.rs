//! Joins tasks, progress, and stages into per-user task views.

use std::collections::HashMap;

use super::fetch::Snapshot;
use super::UserTaskView;
use crate::model::{GuidanceStage, ProgressRecord};

/// Builds one view per task definition, in task order, for `user_id`.
///
/// Only the user's own progress records count; when several exist for one
/// task the last one read wins. Progress for unknown tasks is ignored and
/// tasks without a known stage keep no stage name.
#[must_use]
pub fn reconcile(snapshot: &Snapshot, user_id: &str) -> Vec<UserTaskView> {
    let progress: HashMap<&str, &ProgressRecord> = snapshot
        .progress
        .iter()
        .filter(|record| record.user_id == user_id)
        .map(|record| (record.task_id.as_str(), record))
        .collect();
    let stages: HashMap<&str, &GuidanceStage> =
        snapshot.stages.iter().map(|stage| (stage.id.as_str(), stage)).collect();

    snapshot
        .tasks
        .iter()
        .map(|task| {
            let record = progress.get(task.id.as_str()).copied();
            let stage = task
                .application_guidance_id
                .as_deref()
                .and_then(|id| stages.get(id))
                .copied();
            UserTaskView::build(task, record, stage, user_id)
        })
        .collect()
}
