//! # pte-chat
//!
//! Chat transport for the personal task engine.
//!
//! [`ChatTransport`] is the port the bot and the CLI `send-*` commands talk
//! to: fetch the latest messages of the configured channel and post a reply
//! to it. Adapters:
//! - [`DiscordClient`]: Discord REST v10 over reqwest, one retry on 429
//! - [`MemoryTransport`]: scripted in-memory channel for tests and dry runs
//!
//! [`limits`] holds the platform size caps and the truncation/chunking helpers.

pub mod discord;
pub mod limits;
pub mod memory;
pub mod message;

mod error;
mod http;

pub use discord::DiscordClient;
pub use error::ChatError;
pub use memory::MemoryTransport;
pub use message::{ChatMessage, Embed, EmbedField, OutboundMessage};

/// A single chat channel: read recent messages, post replies.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    /// The most recent `limit` messages, in whatever order the platform
    /// returns them.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] on transport failure or a malformed body.
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<ChatMessage>, ChatError>;

    /// Post one message to the channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if the message was not accepted.
    async fn send(&self, message: &OutboundMessage) -> Result<(), ChatError>;
}
