//! # pte-bot
//!
//! Polling chat bot for the personal task engine.
//!
//! The [`Dispatcher`] reads the configured channel every few seconds,
//! parses `!`-commands with [`command::parse`], applies them through
//! [`pte_db::TaskService`], and replies through any
//! [`pte_chat::ChatTransport`]. Progress is tracked by a persisted
//! watermark so a restart never replays handled commands.

pub mod command;
pub mod dispatcher;
pub mod pending;
pub mod render;
pub mod schedule;
pub mod startup;
pub mod watermark;

mod error;

pub use command::{Command, ParseError};
pub use dispatcher::{BotSettings, Dispatcher, discord_dispatcher};
pub use error::BotError;
pub use pending::{PendingDeletes, Resolution};
pub use schedule::DailySchedule;
pub use watermark::WatermarkStore;
