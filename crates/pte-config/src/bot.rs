//! Polling bot behaviour.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_poll_interval_secs() -> u64 {
    5
}

const fn default_fetch_limit() -> u32 {
    20
}

const fn default_startup_report() -> bool {
    true
}

const fn default_list_page_size() -> usize {
    15
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Fixed delay between polling cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Number of recent messages fetched per cycle.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Post the catch-up report when the bot starts.
    #[serde(default = "default_startup_report")]
    pub startup_report: bool,

    /// Local hour (0-23) at which the daily dashboard is posted. Unset disables it.
    #[serde(default)]
    pub daily_summary_hour: Option<u32>,

    /// Task cards per `!list` message before the reply is split.
    #[serde(default = "default_list_page_size")]
    pub list_page_size: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            fetch_limit: default_fetch_limit(),
            startup_report: default_startup_report(),
            daily_summary_hour: None,
            list_page_size: default_list_page_size(),
        }
    }
}

impl BotConfig {
    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_limit == 0 || self.fetch_limit > 100 {
            return Err(ConfigError::InvalidValue {
                field: "bot.fetch_limit".into(),
                reason: "must be between 1 and 100".into(),
            });
        }
        if self.daily_summary_hour.is_some_and(|h| h > 23) {
            return Err(ConfigError::InvalidValue {
                field: "bot.daily_summary_hour".into(),
                reason: "must be between 0 and 23".into(),
            });
        }
        if self.list_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bot.list_page_size".into(),
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = BotConfig::default();
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.fetch_limit, 20);
        assert!(config.startup_report);
        assert_eq!(config.daily_summary_hour, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_hour() {
        let config = BotConfig {
            daily_summary_hour: Some(24),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_fetch() {
        let config = BotConfig {
            fetch_limit: 500,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
