use clap::{Args, Subcommand};

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task.
    Add(AddArgs),
    /// List tasks, newest first.
    List {
        /// todo, in_progress (or doing), done
        #[arg(long, conflicts_with = "scope")]
        status: Option<String>,
        /// all, active, todo, progress, done
        #[arg(long)]
        scope: Option<String>,
        /// Case-insensitive keyword over title, project, description, type, priority
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a task by ID.
    Get { id: i64 },
    /// Change a task's status.
    UpdateStatus {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        status: String,
    },
    /// Delete a task.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Top three unfinished tasks by execution score.
    Focus,
    /// Recompute every task's execution score against today.
    RecalculateScore,
    /// Dashboard summary.
    Summary,
    /// Completion report for the last seven days.
    WeeklyReport,
    /// Post the dashboard to the chat channel.
    SendSummary,
    /// Post the focus list to the chat channel.
    SendFocus,
    /// Post the weekly report to the chat channel.
    SendWeekly,
}

/// Arguments for `pte task add`.
#[derive(Clone, Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub project: String,
    #[arg(long = "type")]
    pub task_type: String,
    #[arg(long)]
    pub title: String,
    /// low, medium, high, urgent
    #[arg(long)]
    pub priority: String,
    #[arg(long)]
    pub module: Option<String>,
    #[arg(long)]
    pub layer: Option<String>,
    #[arg(long)]
    pub story_points: Option<u32>,
    #[arg(long)]
    pub epic: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub due_date: Option<String>,
    #[arg(long)]
    pub impact_score: Option<i64>,
    #[arg(long)]
    pub energy_required: Option<i64>,
    /// Initial status (default todo)
    #[arg(long)]
    pub status: Option<String>,
}
