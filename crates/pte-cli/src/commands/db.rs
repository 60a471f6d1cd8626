use anyhow::Context;
use pte_config::PteConfig;
use pte_db::PteDb;
use serde::Serialize;

use crate::bootstrap::db_path;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::DbCommands;
use crate::output::output;

#[derive(Serialize)]
struct Migrated {
    database: String,
    applied: Vec<String>,
}

/// Handle `pte db`.
pub async fn handle(action: &DbCommands, config: &PteConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = db_path(config);
    let db = PteDb::open(&path)
        .await
        .with_context(|| format!("failed to open task database at {path}"))?;

    match action {
        DbCommands::Migrate => {
            let applied = db.run_migrations().await?;
            tracing::info!(count = applied.len(), "migrations applied");
            output(
                &Migrated {
                    database: path,
                    applied,
                },
                flags.format,
            )
        }
        DbCommands::Status => output(&db.migration_status().await?, flags.format),
    }
}
