//! # pte-config
//!
//! Layered configuration loading for the task engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PTE_*` prefix, `__` as separator)
//! 2. Legacy `DISCORD_BOT_TOKEN`, `DISCORD_CHANNEL_ID`, `DISCORD_USER_ID`
//! 3. Project-level `.pte/config.toml`
//! 4. User-level `~/.config/pte/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PTE_GENERAL__DB_PATH` -> `general.db_path`,
//! `PTE_BOT__POLL_INTERVAL_SECS` -> `bot.poll_interval_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pte_config::PteConfig;
//!
//! let config = PteConfig::load_with_dotenv().expect("config");
//! if config.discord.is_configured() {
//!     println!("channel: {}", config.discord.channel_id);
//! }
//! ```

mod bot;
mod discord;
mod error;
mod general;

pub use bot::BotConfig;
pub use discord::DiscordConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Un-prefixed variables honoured for compatibility with plain `.env` files.
const LEGACY_DISCORD_VARS: [(&str, &str); 3] = [
    ("DISCORD_BOT_TOKEN", "discord.bot_token"),
    ("DISCORD_CHANNEL_ID", "discord.channel_id"),
    ("DISCORD_USER_ID", "discord.user_id"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PteConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

impl PteConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.bot.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the working tree.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".pte/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Self::legacy_env())
            .merge(Env::prefixed("PTE_").split("__"))
    }

    /// `DISCORD_*` variables mapped onto the `discord` section.
    fn legacy_env() -> Env {
        Env::raw().filter_map(|key| {
            LEGACY_DISCORD_VARS
                .iter()
                .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                .map(|(_, path)| (*path).into())
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pte").join("config.toml"))
    }

    /// Load `.env` from the crate's workspace root or the current directory.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
