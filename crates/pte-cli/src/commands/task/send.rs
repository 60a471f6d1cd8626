use anyhow::Context;
use pte_bot::render::{dashboard_text, focus_text, weekly_text};
use pte_chat::{ChatTransport, DiscordClient, OutboundMessage};
use pte_core::scoring::FOCUS_LIMIT;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct Sent {
    report: &'static str,
    sent: bool,
}

pub async fn summary(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = dashboard_text(&ctx.service.dashboard_summary().await?);
    post("summary", text, ctx, flags).await
}

pub async fn focus(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = focus_text(&ctx.service.focus(FOCUS_LIMIT).await?);
    post("focus", text, ctx, flags).await
}

pub async fn weekly(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = weekly_text(&ctx.service.weekly_report().await?);
    post("weekly", text, ctx, flags).await
}

async fn post(
    report: &'static str,
    text: String,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = DiscordClient::from_config(&ctx.config.discord)
        .context("discord is not configured (set discord.bot_token and discord.channel_id)")?;
    client
        .send(&code_block(&text))
        .await
        .with_context(|| format!("failed to send {report} to discord"))?;
    tracing::info!(report, "report sent");
    output(&Sent { report, sent: true }, flags.format)
}

fn code_block(text: &str) -> OutboundMessage {
    OutboundMessage::text(format!("```\n{text}\n```"))
}

#[cfg(test)]
mod tests {
    use super::code_block;

    #[test]
    fn reports_are_fenced() {
        let message = code_block("FOCUS TODAY");
        assert_eq!(message.content.as_deref(), Some("```\nFOCUS TODAY\n```"));
        assert!(message.embed.is_none());
    }
}
