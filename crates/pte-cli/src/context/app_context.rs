use anyhow::Context;
use pte_config::PteConfig;
use pte_db::TaskService;

use crate::bootstrap::db_path;

/// Shared application resources initialized once per invocation.
pub struct AppContext {
    pub service: TaskService,
    pub config: PteConfig,
}

impl AppContext {
    /// Open (and migrate) the task database named by the configuration.
    pub async fn init(config: PteConfig) -> anyhow::Result<Self> {
        let path = db_path(&config);
        let service = TaskService::open_local(&path)
            .await
            .with_context(|| format!("failed to open task database at {path}"))?;
        tracing::debug!(db = %path, "task database ready");
        Ok(Self { service, config })
    }
}
