//! Writing one completion change through to the progress collection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::context::ServiceContext;
use crate::error::StoreError;
use crate::model::{ProgressRecord, PROGRESS};
use crate::ports::store::record_id;

/// Which write a toggle performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressWrite {
    /// An existing progress record was updated.
    Updated,
    /// A new progress record was created.
    Created,
}

/// Result of a successful toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// Task that was toggled.
    pub task_id: String,
    /// Id of the progress record written.
    pub record_id: String,
    /// Completion flag now stored.
    pub is_completed: bool,
    /// Whether the record was updated or created.
    pub write: ProgressWrite,
}

/// The completion state to store for one task of one user.
pub(crate) struct ProgressChange<'a> {
    pub user_id: &'a str,
    pub task_id: &'a str,
    /// Id the board currently knows the record by.
    pub record_id: &'a str,
    pub is_completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
}

/// Updates the progress record if it exists, creates it otherwise.
///
/// Performs one existence check and at most one write. Only a "not found"
/// answer counts as absent; any other lookup failure is returned unwritten.
pub(crate) async fn write_progress(
    ctx: &ServiceContext,
    change: &ProgressChange<'_>,
) -> Result<ToggleOutcome, StoreError> {
    let exists = match ctx.store.get_by_id(PROGRESS, change.record_id).await {
        Ok(found) => found.is_some(),
        Err(e) if e.is_not_found() => false,
        Err(e) => {
            warn!(record = change.record_id, error = %e, "progress lookup failed");
            return Err(e);
        }
    };

    let (written, write) = if exists {
        let patch = json!({
            "_id": change.record_id,
            "isCompleted": change.is_completed,
            "completedDate": change.completed_date,
        });
        (ctx.store.update(PROGRESS, patch).await?, ProgressWrite::Updated)
    } else {
        let record = json!({
            "_id": ProgressRecord::id_for(change.task_id, change.user_id),
            "userId": change.user_id,
            "taskId": change.task_id,
            "isCompleted": change.is_completed,
            "completedDate": change.completed_date,
        });
        (ctx.store.create(PROGRESS, record).await?, ProgressWrite::Created)
    };

    let record_id = record_id(&written).unwrap_or(change.record_id).to_string();
    debug!(task = change.task_id, record = %record_id, ?write, "progress written");
    Ok(ToggleOutcome {
        task_id: change.task_id.to_string(),
        record_id,
        is_completed: change.is_completed,
        write,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveClock;
    use crate::adapters::local::MemoryStore;

    fn change(record_id: &str, done: bool) -> ProgressChange<'_> {
        ProgressChange {
            user_id: "u1",
            task_id: "t1",
            record_id,
            is_completed: done,
            completed_date: done.then(Utc::now),
        }
    }

    #[tokio::test]
    async fn creates_with_deterministic_id_when_absent() {
        let ctx = ServiceContext::new(Box::new(LiveClock), Box::new(MemoryStore::new()));

        let outcome = write_progress(&ctx, &change("progress-t1-u1", true)).await.unwrap();
        assert_eq!(outcome.write, ProgressWrite::Created);
        assert_eq!(outcome.record_id, "progress-t1-u1");

        let stored = ctx.store.get_by_id(PROGRESS, "progress-t1-u1").await.unwrap().unwrap();
        assert_eq!(stored["userId"], "u1");
        assert_eq!(stored["isCompleted"], true);
        assert!(stored["completedDate"].is_string());
    }

    #[tokio::test]
    async fn failed_lookup_writes_nothing() {
        let store = std::sync::Arc::new(MemoryStore::new().with_collection(
            PROGRESS,
            vec![json!({"_id": "legacy-1", "userId": "u1", "taskId": "t1", "isCompleted": true})],
        ));
        store.set_fail_reads(true);
        let ctx = ServiceContext::new(Box::new(LiveClock), Box::new(std::sync::Arc::clone(&store)));

        let err = write_progress(&ctx, &change("legacy-1", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.records(PROGRESS).len(), 1);
    }

    #[tokio::test]
    async fn updates_existing_record_and_clears_date() {
        let store = MemoryStore::new().with_collection(
            PROGRESS,
            vec![json!({
                "_id": "p1", "userId": "u1", "taskId": "t1",
                "isCompleted": true, "completedDate": "2025-01-01T00:00:00Z"
            })],
        );
        let ctx = ServiceContext::new(Box::new(LiveClock), Box::new(store));

        let outcome = write_progress(&ctx, &change("p1", false)).await.unwrap();
        assert_eq!(outcome.write, ProgressWrite::Updated);

        let stored = ctx.store.get_by_id(PROGRESS, "p1").await.unwrap().unwrap();
        assert_eq!(stored["isCompleted"], false);
        assert!(stored["completedDate"].is_null());
        assert_eq!(stored["userId"], "u1");
    }
}
