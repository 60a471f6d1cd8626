//! Discord channel credentials.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ConfigError;

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscordConfig {
    /// Bot token, sent as `Authorization: Bot <token>`.
    #[serde(default)]
    pub bot_token: String,

    /// The single channel the bot reads commands from and replies to.
    #[serde(default, deserialize_with = "snowflake")]
    pub channel_id: String,

    /// User mentioned in the startup report and daily summary (optional).
    #[serde(default, deserialize_with = "snowflake")]
    pub user_id: String,

    /// REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request socket timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Discord ids arrive as strings from TOML but as numbers from env parsing.
fn snowflake<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    })
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            channel_id: String::new(),
            user_id: String::new(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl DiscordConfig {
    /// Token and channel are both present.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.channel_id.is_empty()
    }

    /// Fail with `NotConfigured` unless token and channel are present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for the `discord` section.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "discord".to_string(),
            })
        }
    }

    /// Mention target, if one is configured.
    pub fn mention_user(&self) -> Option<&str> {
        Some(self.user_id.as_str()).filter(|id| !id.is_empty())
    }
}
