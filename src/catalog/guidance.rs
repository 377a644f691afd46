//! Ordering and grouping of guidance stages.

use crate::context::ServiceContext;
use crate::error::StoreError;
use crate::model::{self, GuidanceStage};
use crate::ports::store::Query;
use crate::tracker::FALLBACK_STAGE;

/// Reads guidance stages in journey order.
///
/// # Errors
///
/// Returns an error if the guidance collection cannot be read.
pub async fn load(ctx: &ServiceContext, limit: usize) -> Result<Vec<GuidanceStage>, StoreError> {
    let page = ctx.store.get_all(model::GUIDANCE, &Query::limit(limit)).await?;
    Ok(ordered(model::decode_all(model::GUIDANCE, page.items)))
}

/// Sorts stages by sequence number; missing numbers count as 0 and ties keep input order.
#[must_use]
pub fn ordered(mut stages: Vec<GuidanceStage>) -> Vec<GuidanceStage> {
    stages.sort_by_key(|stage| stage.sequence_number.unwrap_or(0));
    stages
}

/// Groups stages by stage name, in order of first appearance.
#[must_use]
pub fn group_by_stage(stages: &[GuidanceStage]) -> Vec<(&str, Vec<&GuidanceStage>)> {
    let mut groups: Vec<(&str, Vec<&GuidanceStage>)> = Vec::new();
    for stage in stages {
        let name = stage.stage_name.as_deref().unwrap_or(FALLBACK_STAGE);
        match groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, members)) => members.push(stage),
            None => groups.push((name, vec![stage])),
        }
    }
    groups
}
