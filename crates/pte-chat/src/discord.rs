//! Discord REST adapter.
//!
//! Reads the channel with `GET /channels/{id}/messages?limit=N` and posts with
//! `POST /channels/{id}/messages`, authenticating as `Bot <token>`. A 429 is
//! retried once after the advertised wait; any other failure is returned.

use std::future::Future;
use std::time::Duration;

use pte_config::DiscordConfig;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::ChatTransport;
use crate::error::ChatError;
use crate::http::check_response;
use crate::message::{ChatMessage, OutboundMessage};

const USER_AGENT: &str = concat!("personal-task-engine/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct RawMessage {
    id: String,
    #[serde(default)]
    content: String,
    author: RawAuthor,
}

#[derive(Deserialize)]
struct RawAuthor {
    id: String,
    #[serde(default)]
    bot: bool,
}

/// Client bound to one channel.
pub struct DiscordClient {
    http: reqwest::Client,
    messages_url: String,
    auth: String,
}

impl DiscordClient {
    /// Build a client from the `discord` config section.
    ///
    /// # Errors
    ///
    /// `NotConfigured` without token and channel; `Http` if the client cannot
    /// be built.
    pub fn from_config(config: &DiscordConfig) -> Result<Self, ChatError> {
        if !config.is_configured() {
            return Err(ChatError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            messages_url: format!(
                "{}/channels/{}/messages",
                config.api_base.trim_end_matches('/'),
                config.channel_id
            ),
            auth: format!("Bot {}", config.bot_token),
        })
    }

    /// Send a request, retrying once if the first attempt is rate limited.
    async fn execute(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ChatError> {
        let build = &build;
        retry_once_on_rate_limit(|| async move {
            match build().send().await {
                Ok(resp) => check_response(resp).await,
                Err(e) => Err(ChatError::from(e)),
            }
        })
        .await
    }
}

/// Run `attempt`; on `RateLimited`, wait the advertised time and run it once
/// more. The second result is returned as is.
async fn retry_once_on_rate_limit<T, F, Fut>(mut attempt: F) -> Result<T, ChatError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ChatError>>,
{
    match attempt().await {
        Err(ChatError::RateLimited { retry_after_secs }) => {
            warn!(retry_after_secs, "rate limited, retrying once");
            tokio::time::sleep(Duration::from_secs_f64(retry_after_secs.max(0.0))).await;
            attempt().await
        }
        other => other,
    }
}

impl ChatTransport for DiscordClient {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<ChatMessage>, ChatError> {
        let url = format!("{}?limit={}", self.messages_url, limit.clamp(1, 100));
        let resp = self
            .execute(|| self.http.get(&url).header(reqwest::header::AUTHORIZATION, &self.auth))
            .await?;
        parse_messages(&resp.text().await?)
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), ChatError> {
        let payload = message.to_payload();
        self.execute(|| {
            self.http
                .post(&self.messages_url)
                .header(reqwest::header::AUTHORIZATION, &self.auth)
                .json(&payload)
        })
        .await?;
        debug!("message posted");
        Ok(())
    }
}

/// Decode a message-list body. Entries whose id is not numeric are skipped.
fn parse_messages(body: &str) -> Result<Vec<ChatMessage>, ChatError> {
    let raw: Vec<RawMessage> =
        serde_json::from_str(body).map_err(|e| ChatError::Parse(e.to_string()))?;
    Ok(raw
        .into_iter()
        .filter_map(|m| match m.id.parse::<u64>() {
            Ok(id) => Some(ChatMessage {
                id,
                author_id: m.author.id,
                author_is_bot: m.author.bot,
                content: m.content,
            }),
            Err(_) => {
                debug!(id = %m.id, "skipping message with non-numeric id");
                None
            }
        })
        .collect())
}
