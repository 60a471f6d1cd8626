use std::path::PathBuf;

use anyhow::Context;
use pte_config::PteConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (reading `.env` first) and apply the `--db` override.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PteConfig> {
    let mut config = PteConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(db) = &flags.db {
        config.general.db_path = PathBuf::from(db);
    }
    Ok(config)
}

/// Database path as the storage layer expects it.
pub fn db_path(config: &PteConfig) -> String {
    config.general.db_path.to_string_lossy().into_owned()
}
