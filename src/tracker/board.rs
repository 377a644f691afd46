//! Session-scoped task board for one user.

use tracing::{info, warn};

use super::fetch::fetch_snapshot;
use super::progress::Progress;
use super::reconcile::reconcile;
use super::toggle::{write_progress, ProgressChange, ToggleOutcome};
use super::UserTaskView;
use crate::context::ServiceContext;
use crate::error::TrackerError;

/// The task views of one user, owned by the session that loaded them.
///
/// Loads replace every view. Toggles change one view locally, write it
/// through, and fall back to a full reload when the write fails. Mutation
/// needs `&mut self`, so one board never runs two toggles at once; separate
/// boards writing the same store race and the last write wins.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    user_id: String,
    page_limit: usize,
    tasks: Vec<UserTaskView>,
    loaded: bool,
}

impl TaskBoard {
    /// Creates an empty board for `user_id`; bulk reads are capped at `page_limit`.
    #[must_use]
    pub fn new(user_id: impl Into<String>, page_limit: usize) -> Self {
        Self { user_id: user_id.into(), page_limit, tasks: Vec::new(), loaded: false }
    }

    /// The user this board belongs to.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// True after a successful load, until a load fails.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All views, in task-definition order.
    #[must_use]
    pub fn tasks(&self) -> &[UserTaskView] {
        &self.tasks
    }

    /// The view of one task.
    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&UserTaskView> {
        self.tasks.iter().find(|view| view.task_id == task_id)
    }

    /// Views whose stage label equals `stage`.
    ///
    /// Tasks without a known stage are listed under "General".
    #[must_use]
    pub fn tasks_in_stage(&self, stage: &str) -> Vec<&UserTaskView> {
        self.tasks.iter().filter(|view| view.stage_label() == stage).collect()
    }

    /// Completion counts for all views, or for one stage.
    #[must_use]
    pub fn progress(&self, stage: Option<&str>) -> Progress {
        match stage {
            Some(stage) => Progress::of(self.tasks_in_stage(stage)),
            None => Progress::of(&self.tasks),
        }
    }

    /// Views grouped by stage label, groups in order of first appearance.
    #[must_use]
    pub fn stage_groups(&self) -> Vec<(&str, Vec<&UserTaskView>)> {
        let mut groups: Vec<(&str, Vec<&UserTaskView>)> = Vec::new();
        for view in &self.tasks {
            let label = view.stage_label();
            match groups.iter_mut().find(|(name, _)| *name == label) {
                Some((_, members)) => members.push(view),
                None => groups.push((label, vec![view])),
            }
        }
        groups
    }

    /// Reads all three collections and rebuilds every view.
    ///
    /// On failure the board is left empty.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Fetch`] when any bulk read fails.
    pub async fn load(&mut self, ctx: &ServiceContext) -> Result<(), TrackerError> {
        match fetch_snapshot(ctx, self.page_limit).await {
            Ok(snapshot) => {
                self.tasks = reconcile(&snapshot, &self.user_id);
                self.loaded = true;
                info!(user = %self.user_id, tasks = self.tasks.len(), "task board loaded");
                Ok(())
            }
            Err(e) => {
                self.tasks.clear();
                self.loaded = false;
                warn!(user = %self.user_id, error = %e, "failed to load task board");
                Err(e)
            }
        }
    }

    /// Flips completion of `task_id` and stores the change.
    ///
    /// The view is changed and marked pending first. When the write
    /// succeeds it is confirmed; when it fails every view is rebuilt from
    /// a fresh read (or cleared, if that read fails too).
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownTask`] without touching the store when
    /// the task is not on the board, and [`TrackerError::Write`] after
    /// resyncing when the write fails.
    pub async fn toggle(
        &mut self,
        ctx: &ServiceContext,
        task_id: &str,
    ) -> Result<ToggleOutcome, TrackerError> {
        let index = self
            .tasks
            .iter()
            .position(|view| view.task_id == task_id)
            .ok_or_else(|| TrackerError::UnknownTask(task_id.to_string()))?;

        let view = &mut self.tasks[index];
        view.begin_toggle(ctx.clock.now());
        let record_id = view.id.clone();
        let change = ProgressChange {
            user_id: &self.user_id,
            task_id,
            record_id: &record_id,
            is_completed: view.is_completed,
            completed_date: view.completed_date,
        };

        match write_progress(ctx, &change).await {
            Ok(outcome) => {
                self.tasks[index].confirm(outcome.record_id.clone());
                info!(
                    user = %self.user_id,
                    task = task_id,
                    completed = outcome.is_completed,
                    "task toggled"
                );
                Ok(outcome)
            }
            Err(source) => {
                warn!(task = task_id, error = %source, "progress write failed; reloading board");
                // A failed reload has already cleared the board and logged why.
                let _ = self.load(ctx).await;
                Err(TrackerError::Write { task_id: task_id.to_string(), source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveClock;
    use crate::adapters::local::MemoryStore;
    use crate::model::{GUIDANCE, PROGRESS, TASKS};
    use crate::tracker::SyncState;
    use serde_json::json;

    fn seeded_store() -> MemoryStore {
        MemoryStore::new()
            .with_collection(
                TASKS,
                vec![
                    json!({"_id": "t1", "taskTitle": "Pick schools", "applicationGuidanceId": "g1"}),
                    json!({"_id": "t2", "taskTitle": "Draft essay", "applicationGuidanceId": "g2"}),
                    json!({"_id": "t3", "taskTitle": "Book test date"}),
                ],
            )
            .with_collection(
                GUIDANCE,
                vec![
                    json!({"_id": "g1", "stageName": "Research"}),
                    json!({"_id": "g2", "stageName": "Documents"}),
                ],
            )
    }

    fn ctx(store: MemoryStore) -> ServiceContext {
        ServiceContext::new(Box::new(LiveClock), Box::new(store))
    }

    #[tokio::test]
    async fn groups_and_filters_by_stage_label() {
        let ctx = ctx(seeded_store());
        let mut board = TaskBoard::new("u1", 100);
        board.load(&ctx).await.unwrap();

        let groups: Vec<(&str, usize)> =
            board.stage_groups().iter().map(|(name, views)| (*name, views.len())).collect();
        assert_eq!(groups, vec![("Research", 1), ("Documents", 1), ("General", 1)]);
        assert_eq!(board.tasks_in_stage("General")[0].task_id, "t3");
        assert_eq!(board.progress(Some("Research")), Progress { completed: 0, total: 1 });
    }

    #[tokio::test]
    async fn toggle_creates_then_updates_the_same_record() {
        let ctx = ctx(seeded_store());
        let mut board = TaskBoard::new("u1", 100);
        board.load(&ctx).await.unwrap();

        let first = board.toggle(&ctx, "t1").await.unwrap();
        assert_eq!(first.write, crate::tracker::ProgressWrite::Created);
        assert!(board.task("t1").unwrap().is_completed);
        assert_eq!(board.task("t1").unwrap().sync, SyncState::Confirmed);

        let second = board.toggle(&ctx, "t1").await.unwrap();
        assert_eq!(second.write, crate::tracker::ProgressWrite::Updated);
        assert_eq!(second.record_id, first.record_id);
        assert!(!board.task("t1").unwrap().is_completed);
        assert!(board.task("t1").unwrap().completed_date.is_none());

        let records = ctx.store.get_all(PROGRESS, &crate::ports::Query::limit(10)).await.unwrap();
        assert_eq!(records.items.len(), 1);
    }

    #[tokio::test]
    async fn unknown_task_is_rejected() {
        let ctx = ctx(seeded_store());
        let mut board = TaskBoard::new("u1", 100);
        board.load(&ctx).await.unwrap();

        let err = board.toggle(&ctx, "nope").await.unwrap_err();
        assert!(matches!(err, TrackerError::UnknownTask(id) if id == "nope"));
    }

    #[tokio::test]
    async fn failed_load_empties_the_board() {
        let store = seeded_store();
        store.set_fail_reads(true);
        let ctx = ctx(store);
        let mut board = TaskBoard::new("u1", 100);

        assert!(board.load(&ctx).await.is_err());
        assert!(board.tasks().is_empty());
        assert!(!board.is_loaded());
        assert!(board.progress(None).percentage().abs() < f64::EPSILON);
    }
}
