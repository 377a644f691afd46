//! Guidance stages of the application journey.

use serde::{Deserialize, Serialize};

/// A named phase of the application journey. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceStage {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title of this guidance step.
    pub step_title: Option<String>,
    /// Stage the step belongs to, e.g. "Document Preparation".
    pub stage_name: Option<String>,
    /// Position in the journey.
    pub sequence_number: Option<i64>,
    /// Instructional text.
    pub detailed_description: Option<String>,
    /// Newline-delimited action items.
    #[serde(rename = "actionableToDos")]
    pub actionable_todos: Option<String>,
}

impl GuidanceStage {
    /// Action items, one per non-blank line, trimmed.
    #[must_use]
    pub fn action_items(&self) -> Vec<&str> {
        self.actionable_todos
            .as_deref()
            .map(|text| text.lines().map(str::trim).filter(|line| !line.is_empty()).collect())
            .unwrap_or_default()
    }
}
