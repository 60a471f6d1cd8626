use clap::Subcommand;

use crate::cli::subcommands::{BotCommands, DbCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Task management and reports.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Database schema.
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },
    /// Chat bot.
    Bot {
        #[command(subcommand)]
        action: BotCommands,
    },
}

impl Commands {
    /// Commands that keep running until interrupted.
    #[must_use]
    pub const fn is_long_running(&self) -> bool {
        matches!(self, Self::Bot { .. })
    }
}
