//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_db_path() -> PathBuf {
    PathBuf::from("tasks.db")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Directory for bot state (the message watermark file).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            data_dir: default_data_dir(),
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// Path of the persisted `last_message_id` file.
    #[must_use]
    pub fn watermark_path(&self) -> PathBuf {
        self.data_dir.join("last_message_id.txt")
    }
}
