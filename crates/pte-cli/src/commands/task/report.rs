use pte_bot::render::{dashboard_text, focus_text, weekly_text};
use pte_core::scoring::FOCUS_LIMIT;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, output_report, output_tasks};

pub async fn focus(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tasks = ctx.service.focus(FOCUS_LIMIT).await?;
    if flags.format == OutputFormat::Table {
        println!("{}", focus_text(&tasks));
        return Ok(());
    }
    output_tasks(&tasks, flags.format)
}

#[derive(Serialize)]
struct Rescored {
    rescored: usize,
}

pub async fn recalculate(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rescored = ctx.service.recalculate_all_scores().await?;
    output(&Rescored { rescored }, flags.format)
}

pub async fn summary(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = ctx.service.dashboard_summary().await?;
    output_report(&summary, dashboard_text, flags.format)
}

pub async fn weekly(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.weekly_report().await?;
    output_report(&report, weekly_text, flags.format)
}
