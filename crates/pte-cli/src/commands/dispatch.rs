use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route commands that need the opened task database.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Db { .. } | Commands::Bot { .. } => {
            unreachable!("db/bot are pre-dispatched in main")
        }
    }
}
