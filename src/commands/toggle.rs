//! `waypoint toggle` command.

use super::tasks::progress_line;
use super::Session;
use crate::context::ServiceContext;
use crate::tracker::TaskBoard;

/// Execute the `toggle` command.
///
/// Loads the user's board, flips one task, and prints the new state.
///
/// # Errors
///
/// Returns an error string if no user is set, the board cannot be loaded,
/// the task is unknown, or the progress write fails.
pub async fn run(ctx: &ServiceContext, session: &Session, task_id: &str) -> Result<(), String> {
    let mut board = TaskBoard::new(session.require_user()?, session.page_limit);
    board.load(ctx).await.map_err(|e| e.to_string())?;

    let outcome = board.toggle(ctx, task_id).await.map_err(|e| e.to_string())?;
    let title = board.task(task_id).map_or(task_id, |view| view.title.as_str());
    let verb = if outcome.is_completed { "Completed" } else { "Reopened" };
    println!("{verb}: {title}");
    println!("{}", progress_line(board.progress(None)));
    Ok(())
}
