use anyhow::bail;
use pte_core::enums::TaskStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusChange {
    id: i64,
    status: TaskStatus,
    execution_score: f64,
}

pub async fn run(id: i64, status: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = status.parse::<TaskStatus>()?;
    if ctx.service.set_status(id, status).await? == 0 {
        bail!("task {id} not found");
    }
    let task = ctx.service.get_task(id).await?;
    output(
        &StatusChange {
            id,
            status: task.status,
            execution_score: task.execution_score,
        },
        flags.format,
    )
}
