//! University catalog entries.

use serde::{Deserialize, Serialize};

/// A university a student can research. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    /// Record id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub university_name: Option<String>,
    /// City or country.
    pub location: Option<String>,
    /// Estimated yearly cost.
    pub estimated_budget: Option<f64>,
    /// Free-text list of programs.
    pub programs_offered: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Campus image URL.
    pub campus_image: Option<String>,
    /// Global ranking position.
    pub global_ranking: Option<u32>,
}

impl University {
    /// Name for display, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.university_name.as_deref().unwrap_or(&self.id)
    }
}
