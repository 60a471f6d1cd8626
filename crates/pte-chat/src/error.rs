//! Chat transport error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// HTTP transport error (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The chat API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: f64 },

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Credentials or channel id are missing.
    #[error("chat transport is not configured (set discord.bot_token and discord.channel_id)")]
    NotConfigured,
}
