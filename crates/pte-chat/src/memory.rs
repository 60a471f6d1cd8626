//! In-memory channel.
//!
//! Messages pushed into the inbox are returned by every fetch (newest first,
//! like the platform); everything sent is recorded in the outbox. A fetch
//! failure can be scripted for the next call.

use std::sync::Mutex;

use crate::ChatTransport;
use crate::error::ChatError;
use crate::message::{ChatMessage, OutboundMessage};

#[derive(Debug, Default)]
pub struct MemoryTransport {
    inbox: Mutex<Vec<ChatMessage>>,
    outbox: Mutex<Vec<OutboundMessage>>,
    fail_next_fetch: Mutex<bool>,
}

impl MemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a message visible to subsequent fetches.
    pub fn push(&self, message: ChatMessage) {
        lock(&self.inbox).push(message);
    }

    /// Convenience for a human-authored message.
    pub fn push_user(&self, id: u64, author_id: &str, content: &str) {
        self.push(ChatMessage {
            id,
            author_id: author_id.to_string(),
            author_is_bot: false,
            content: content.to_string(),
        });
    }

    /// The next fetch returns a transport error.
    pub fn fail_next_fetch(&self) {
        *lock(&self.fail_next_fetch) = true;
    }

    /// Everything sent so far, in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<OutboundMessage> {
        lock(&self.outbox).clone()
    }

    /// Drain and return everything sent so far.
    pub fn take_sent(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *lock(&self.outbox))
    }
}

/// A poisoned lock only means a test panicked mid-push; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl ChatTransport for MemoryTransport {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<ChatMessage>, ChatError> {
        if std::mem::take(&mut *lock(&self.fail_next_fetch)) {
            return Err(ChatError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            });
        }
        let mut messages = lock(&self.inbox).clone();
        messages.sort_by(|a, b| b.id.cmp(&a.id));
        messages.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(messages)
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), ChatError> {
        lock(&self.outbox).push(message.clone());
        Ok(())
    }
}
