//! `waypoint guidance` command.

use std::fmt::Write as _;

use super::Session;
use crate::catalog::guidance;
use crate::context::ServiceContext;
use crate::model::GuidanceStage;

/// Execute the `guidance` command.
///
/// # Errors
///
/// Returns an error string if the guidance collection cannot be read.
pub async fn run(ctx: &ServiceContext, session: &Session) -> Result<(), String> {
    let stages = guidance::load(ctx, session.page_limit)
        .await
        .map_err(|e| format!("Failed to load guidance: {e}"))?;
    print!("{}", render(&stages));
    Ok(())
}

/// Renders ordered stages grouped by stage name.
#[must_use]
pub fn render(stages: &[GuidanceStage]) -> String {
    if stages.is_empty() {
        return "No guidance available yet.\n".to_string();
    }

    let mut out = String::new();
    for (name, steps) in guidance::group_by_stage(stages) {
        let _ = writeln!(out, "== {name} ==");
        for step in steps {
            let title = step.step_title.as_deref().unwrap_or(name);
            let _ = match step.sequence_number {
                Some(seq) => writeln!(out, "{seq}. {title}"),
                None => writeln!(out, "- {title}"),
            };
            if let Some(text) = step.detailed_description.as_deref() {
                let _ = writeln!(out, "   {text}");
            }
            for item in step.action_items() {
                let _ = writeln!(out, "   [ ] {item}");
            }
        }
        let _ = writeln!(out);
    }
    out
}
