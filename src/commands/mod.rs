//! Command dispatch and handlers.

pub mod guidance;
pub mod tasks;
pub mod toggle;
pub mod universities;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;

/// Per-invocation settings shared by the handlers.
#[derive(Debug, Clone)]
pub struct Session {
    /// Current user, from `--user` or `WAYPOINT_USER_ID`.
    pub user_id: Option<String>,
    /// Bulk-read cap per collection.
    pub page_limit: usize,
}

impl Session {
    /// The current user, or an error telling how to set one.
    ///
    /// # Errors
    ///
    /// Returns an error string when no user is configured.
    pub fn require_user(&self) -> Result<&str, String> {
        self.user_id
            .as_deref()
            .ok_or_else(|| "No user given: pass --user <ID> or set WAYPOINT_USER_ID".to_string())
    }
}

/// Dispatch a parsed command line to its handler.
///
/// With `--replay` every port is served from the cassette. Otherwise the
/// live store is used, recorded to `WAYPOINT_RECORD` when that is set; the
/// cassette is written once the command finishes, even on error.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = Config::load().map_err(|e| e.to_string())?;
    let session = Session {
        user_id: cli.user.clone().or_else(|| config.user_id.clone()),
        page_limit: config.page_limit,
    };

    let ctx = match &cli.replay {
        Some(path) => ServiceContext::replaying(path)?,
        None => ServiceContext::from_config(&config),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(dispatch_with_context(&cli.command, &ctx, &session))
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the handler fails.
pub async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    session: &Session,
) -> Result<(), String> {
    match command {
        Command::Tasks { stage, json } => tasks::run(ctx, session, stage.as_deref(), *json).await,
        Command::Toggle { task_id } => toggle::run(ctx, session, task_id).await,
        Command::Guidance => guidance::run(ctx, session).await,
        Command::Universities { search, location, budget } => {
            let filter = crate::catalog::universities::UniversityFilter {
                search: search.clone(),
                location: location.clone(),
                budget: *budget,
            };
            universities::run_list(ctx, session, &filter).await
        }
        Command::University { id } => universities::run_show(ctx, id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_user_explains_how_to_set_one() {
        let session = Session { user_id: None, page_limit: 100 };
        let err = session.require_user().unwrap_err();
        assert!(err.contains("--user"));

        let session = Session { user_id: Some("u1".into()), page_limit: 100 };
        assert_eq!(session.require_user(), Ok("u1"));
    }
}
