//! `waypoint tasks` command.

use std::fmt::Write as _;

use super::Session;
use crate::context::ServiceContext;
use crate::tracker::{Progress, TaskBoard, UserTaskView};

/// Execute the `tasks` command.
///
/// # Errors
///
/// Returns an error string if no user is set or the board cannot be loaded.
pub async fn run(
    ctx: &ServiceContext,
    session: &Session,
    stage: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let mut board = TaskBoard::new(session.require_user()?, session.page_limit);
    board.load(ctx).await.map_err(|e| e.to_string())?;

    if json {
        let views: Vec<&UserTaskView> = match stage {
            Some(stage) => board.tasks_in_stage(stage),
            None => board.tasks().iter().collect(),
        };
        let out = serde_json::to_string_pretty(&views)
            .map_err(|e| format!("Failed to serialize tasks: {e}"))?;
        println!("{out}");
    } else {
        print!("{}", render(&board, stage));
    }
    Ok(())
}

/// One-line summary such as `1 of 3 tasks completed (33%)`.
#[must_use]
pub fn progress_line(progress: Progress) -> String {
    format!(
        "{} of {} tasks completed ({:.0}%)",
        progress.completed,
        progress.total,
        progress.percentage()
    )
}

/// Renders the board, grouped by stage, or a single stage.
#[must_use]
pub fn render(board: &TaskBoard, stage: Option<&str>) -> String {
    let mut out = String::new();
    let heading = stage.map_or_else(|| "Your Tasks".to_string(), |s| format!("{s} Tasks"));
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", progress_line(board.progress(stage)));
    let _ = writeln!(out);

    match stage {
        Some(stage) => {
            let views = board.tasks_in_stage(stage);
            if views.is_empty() {
                let _ = writeln!(out, "No tasks for this stage yet.");
            }
            for view in views {
                render_task(&mut out, view);
            }
        }
        None => {
            if board.tasks().is_empty() {
                let _ = writeln!(out, "No tasks available. Check back soon!");
            }
            for (name, views) in board.stage_groups() {
                let _ = writeln!(out, "{name}");
                for view in views {
                    render_task(&mut out, view);
                }
            }
        }
    }
    out
}

fn render_task(out: &mut String, view: &UserTaskView) {
    let mark = if view.is_completed { "x" } else { " " };
    let _ = write!(out, "  [{mark}] {}  {}", view.task_id, view.title);

    let mut notes = Vec::new();
    if let Some(due) = view.due_date {
        notes.push(format!("due {}", due.format("%Y-%m-%d")));
    }
    if view.is_optional {
        notes.push("optional".to_string());
    }
    if !notes.is_empty() {
        let _ = write!(out, "  ({})", notes.join(", "));
    }
    let _ = writeln!(out);
}
