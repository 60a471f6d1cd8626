mod add;
mod delete;
mod get;
mod list;
mod report;
mod send;
mod update_status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `pte task`.
pub async fn handle(action: &TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaskCommands::Add(args) => add::run(args, ctx, flags).await,
        TaskCommands::List {
            status,
            scope,
            search,
            limit,
        } => {
            list::run(
                status.as_deref(),
                scope.as_deref(),
                search.as_deref(),
                *limit,
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Get { id } => get::run(*id, ctx, flags).await,
        TaskCommands::UpdateStatus { id, status } => {
            update_status::run(*id, status, ctx, flags).await
        }
        TaskCommands::Delete { id } => delete::run(*id, ctx, flags).await,
        TaskCommands::Focus => report::focus(ctx, flags).await,
        TaskCommands::RecalculateScore => report::recalculate(ctx, flags).await,
        TaskCommands::Summary => report::summary(ctx, flags).await,
        TaskCommands::WeeklyReport => report::weekly(ctx, flags).await,
        TaskCommands::SendSummary => send::summary(ctx, flags).await,
        TaskCommands::SendFocus => send::focus(ctx, flags).await,
        TaskCommands::SendWeekly => send::weekly(ctx, flags).await,
    }
}
