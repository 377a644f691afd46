//! Bulk reads feeding the task board.

use serde_json::Value;
use tracing::debug;

use crate::context::ServiceContext;
use crate::error::TrackerError;
use crate::model::{self, GuidanceStage, ProgressRecord, TaskDefinition};
use crate::ports::store::Query;

/// The three record sets a board is built from.
///
/// Each set is read separately; they may reflect different moments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Task definitions in store order.
    pub tasks: Vec<TaskDefinition>,
    /// Progress records of every user.
    pub progress: Vec<ProgressRecord>,
    /// Guidance stages.
    pub stages: Vec<GuidanceStage>,
}

/// Reads tasks, progress, and guidance, each capped at `limit` records.
///
/// Malformed records are skipped; any failed read fails the whole fetch.
///
/// # Errors
///
/// Returns [`TrackerError::Fetch`] naming the first collection that failed.
pub async fn fetch_snapshot(ctx: &ServiceContext, limit: usize) -> Result<Snapshot, TrackerError> {
    let query = Query::limit(limit);
    let tasks = read(ctx, model::TASKS, &query).await?;
    let progress = read(ctx, model::PROGRESS, &query).await?;
    let stages = read(ctx, model::GUIDANCE, &query).await?;

    Ok(Snapshot {
        tasks: model::decode_all(model::TASKS, tasks),
        progress: model::decode_all(model::PROGRESS, progress),
        stages: model::decode_all(model::GUIDANCE, stages),
    })
}

async fn read(
    ctx: &ServiceContext,
    collection: &'static str,
    query: &Query,
) -> Result<Vec<Value>, TrackerError> {
    let page = ctx
        .store
        .get_all(collection, query)
        .await
        .map_err(|source| TrackerError::Fetch { collection, source })?;
    debug!(collection, count = page.items.len(), "collection read");
    Ok(page.items)
}
