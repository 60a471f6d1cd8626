use anyhow::Context;
use pte_config::PteConfig;
use tracing::{info, warn};

use crate::cli::subcommands::BotCommands;

/// Handle `pte bot`.
pub async fn handle(action: &BotCommands, config: &PteConfig) -> anyhow::Result<()> {
    match action {
        BotCommands::Run => run(config).await,
    }
}

async fn run(config: &PteConfig) -> anyhow::Result<()> {
    let dispatcher = pte_bot::discord_dispatcher(config)
        .await
        .context("failed to start the bot")?;
    info!(
        channel = %config.discord.channel_id,
        db = %config.general.db_path.display(),
        "bot starting"
    );
    dispatcher.run(interrupted()).await;
    info!("bot stopped");
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "cannot listen for Ctrl-C; stop the process to exit");
        std::future::pending::<()>().await;
    }
}
