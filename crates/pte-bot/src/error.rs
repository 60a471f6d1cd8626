//! Error types for pte-bot.

use pte_chat::ChatError;
use pte_db::ServiceError;
use thiserror::Error;

/// Failures while wiring the bot. Once polling, failures are logged and the
/// loop carries on.
#[derive(Debug, Error)]
pub enum BotError {
    /// Chat API unreachable or rejected the request.
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// Task store failure.
    #[error(transparent)]
    Service(#[from] ServiceError),
}
