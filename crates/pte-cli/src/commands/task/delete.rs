use anyhow::bail;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct Deleted {
    id: i64,
    deleted: bool,
}

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.service.delete_task(id).await? == 0 {
        bail!("task {id} not found");
    }
    output(&Deleted { id, deleted: true }, flags.format)
}
