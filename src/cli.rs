//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::universities::BudgetBand;

/// Top-level CLI parser for `waypoint`.
#[derive(Debug, Parser)]
#[command(name = "waypoint", version, about = "Track study-abroad application progress")]
pub struct Cli {
    /// Current user id (overrides `WAYPOINT_USER_ID`).
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Serve every store call and clock reading from this cassette.
    #[arg(long, global = true, value_name = "CASSETTE")]
    pub replay: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List your tasks with completion progress.
    Tasks {
        /// Only show tasks of this stage ("General" for tasks without one).
        #[arg(long)]
        stage: Option<String>,
        /// Print the task views as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Mark a task complete, or incomplete again.
    Toggle {
        /// Id of the task definition.
        task_id: String,
    },
    /// Show application guidance grouped by stage.
    Guidance,
    /// Browse universities.
    Universities {
        /// Text matched against names and programs.
        #[arg(long)]
        search: Option<String>,
        /// Exact location.
        #[arg(long)]
        location: Option<String>,
        /// Budget band: under-30k, 30k-50k, 50k-70k, or above-70k.
        #[arg(long)]
        budget: Option<BudgetBand>,
    },
    /// Show one university.
    University {
        /// Id of the university.
        id: String,
    },
}
