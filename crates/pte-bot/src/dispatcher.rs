//! Polling dispatcher.
//!
//! One cycle: fetch the latest messages, drop those at or below the
//! watermark, bot-authored ones, and anything not starting with a known
//! verb, then handle the rest in ascending id order. Each handled message
//! gets its reply set and then moves the watermark, whether or not the
//! command succeeded. A failed command is never retried.

use std::future::Future;
use std::time::Duration;

use pte_chat::{ChatError, ChatMessage, ChatTransport, DiscordClient, OutboundMessage};
use pte_config::PteConfig;
use pte_core::entities::TaskFilter;
use pte_db::{ServiceError, TaskService};
use tracing::{debug, error, info, warn};

use crate::command::{self, Command};
use crate::error::BotError;
use crate::pending::{PendingDeletes, Resolution};
use crate::render;
use crate::schedule::DailySchedule;
use crate::startup;
use crate::watermark::WatermarkStore;

/// Loop settings, resolved from [`PteConfig`].
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub poll_interval: Duration,
    pub fetch_limit: u32,
    pub startup_report: bool,
    pub daily_summary_hour: Option<u32>,
    pub list_page_size: usize,
    pub mention_user: Option<String>,
}

impl BotSettings {
    #[must_use]
    pub fn from_config(config: &PteConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.bot.poll_interval_secs),
            fetch_limit: config.bot.fetch_limit,
            startup_report: config.bot.startup_report,
            daily_summary_hour: config.bot.daily_summary_hour,
            list_page_size: config.bot.list_page_size,
            mention_user: config.discord.mention_user().map(str::to_string),
        }
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self::from_config(&PteConfig::default())
    }
}

pub struct Dispatcher<T> {
    transport: T,
    service: TaskService,
    watermark: WatermarkStore,
    last_processed: u64,
    pending: PendingDeletes,
    schedule: Option<DailySchedule>,
    settings: BotSettings,
}

fn text(reply: String) -> Result<Vec<OutboundMessage>, ServiceError> {
    Ok(vec![OutboundMessage::text(reply)])
}

/// Wire a Discord-backed dispatcher from configuration: open (and migrate)
/// the task store, build the REST client, and resume from the watermark file.
///
/// # Errors
///
/// `BotError::Chat` when the Discord section is incomplete;
/// `BotError::Service` when the database cannot be opened.
pub async fn discord_dispatcher(config: &PteConfig) -> Result<Dispatcher<DiscordClient>, BotError> {
    let client = DiscordClient::from_config(&config.discord)?;
    let db_path = config.general.db_path.to_string_lossy();
    let service = TaskService::open_local(&db_path).await?;
    let watermark = WatermarkStore::new(config.general.watermark_path());
    Ok(Dispatcher::new(
        client,
        service,
        watermark,
        BotSettings::from_config(config),
    ))
}

impl<T: ChatTransport> Dispatcher<T> {
    /// Build a dispatcher, resuming from the persisted watermark.
    pub fn new(
        transport: T,
        service: TaskService,
        watermark: WatermarkStore,
        settings: BotSettings,
    ) -> Self {
        let last_processed = watermark.load();
        info!(
            last_processed,
            path = %watermark.path().display(),
            "dispatcher resuming"
        );
        Self {
            transport,
            service,
            watermark,
            last_processed,
            pending: PendingDeletes::new(),
            schedule: settings.daily_summary_hour.map(DailySchedule::new),
            settings,
        }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn service(&self) -> &TaskService {
        &self.service
    }

    #[must_use]
    pub const fn last_processed(&self) -> u64 {
        self.last_processed
    }

    #[must_use]
    pub const fn pending(&self) -> &PendingDeletes {
        &self.pending
    }

    /// Run one polling cycle. Returns the number of commands handled.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the fetch failed; nothing was handled
    /// and the watermark is unchanged.
    pub async fn poll_once(&mut self) -> Result<usize, ChatError> {
        let fetched = self.transport.fetch_recent(self.settings.fetch_limit).await?;
        let mut fresh: Vec<ChatMessage> = fetched
            .into_iter()
            .filter(|m| m.id > self.last_processed)
            .filter(|m| !m.author_is_bot)
            .filter(|m| command::is_command(&m.content))
            .collect();
        fresh.sort_by_key(|m| m.id);

        for message in &fresh {
            debug!(message_id = message.id, author = %message.author_id, "handling command");
            let replies = self.handle(message).await;
            for reply in &replies {
                if let Err(e) = self.transport.send(reply).await {
                    warn!(message_id = message.id, error = %e, "reply not delivered");
                }
            }
            self.advance(message.id);
        }
        Ok(fresh.len())
    }

    fn advance(&mut self, id: u64) {
        self.last_processed = id;
        if let Err(e) = self.watermark.store(id) {
            warn!(id, error = %e, "could not persist watermark");
        }
    }

    async fn handle(&mut self, message: &ChatMessage) -> Vec<OutboundMessage> {
        let command = match command::parse(&message.content) {
            Ok(command) => command,
            Err(e) => return vec![OutboundMessage::text(render::parse_failure(&e))],
        };
        match self.execute(command, &message.author_id).await {
            Ok(replies) => replies,
            Err(e) if e.is_validation() => {
                vec![OutboundMessage::text(format!("❌ {e}"))]
            }
            Err(e) => {
                error!(message_id = message.id, error = %e, "command failed");
                vec![OutboundMessage::text(render::storage_failure())]
            }
        }
    }

    async fn execute(
        &mut self,
        command: Command,
        author: &str,
    ) -> Result<Vec<OutboundMessage>, ServiceError> {
        match command {
            Command::Add(input) => {
                let id = self.service.create_task(input.clone()).await?;
                text(render::created(id, &input))
            }
            Command::List { scope, keyword } => {
                let filter = TaskFilter::scope(scope).with_keyword(keyword.as_deref());
                let tasks = self.service.list_tasks(&filter).await?;
                Ok(render::list_messages(
                    scope,
                    keyword.as_deref(),
                    &tasks,
                    self.settings.list_page_size,
                ))
            }
            Command::Detail(id) => match self.service.get_task(id).await {
                Ok(task) => Ok(vec![OutboundMessage::embed(render::detail_embed(&task))]),
                Err(e) if e.is_not_found() => text(render::not_found(id)),
                Err(e) => Err(e),
            },
            Command::SetStatus { id, status } => {
                if self.service.set_status(id, status).await? == 0 {
                    text(render::not_found(id))
                } else {
                    text(render::status_changed(id, status))
                }
            }
            Command::Delete(id) => match self.service.get_task(id).await {
                Ok(task) => {
                    self.pending.request(id, author);
                    text(render::delete_prompt(&task))
                }
                Err(e) if e.is_not_found() => text(render::not_found(id)),
                Err(e) => Err(e),
            },
            Command::Confirm(id) => match self.pending.resolve(id, author) {
                Resolution::Granted => {
                    if self.service.delete_task(id).await? == 0 {
                        text(render::not_found(id))
                    } else {
                        text(render::deleted(id))
                    }
                }
                Resolution::NotAuthorized { requester } => {
                    debug!(task_id = id, requester = %requester, user = author, "confirm refused");
                    text(render::not_authorized(id))
                }
                Resolution::NothingPending => text(render::nothing_pending(id)),
            },
            Command::Cancel(id) => match self.pending.resolve(id, author) {
                Resolution::Granted => text(render::delete_cancelled(id)),
                Resolution::NotAuthorized { .. } => text(render::not_authorized(id)),
                Resolution::NothingPending => text(render::nothing_pending(id)),
            },
            Command::Template(kind) => text(render::template(kind)),
            Command::Help => text(render::help()),
        }
    }

    /// Post the catch-up card.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the card could not be sent.
    pub async fn send_startup_report(&self) -> Result<(), ChatError> {
        let message =
            startup::startup_report(&self.service, self.settings.mention_user.as_deref()).await;
        self.transport.send(&message).await
    }

    /// Post the dashboard if the daily schedule is due. Returns whether it was sent.
    pub async fn send_daily_summary_if_due(&mut self) -> bool {
        let now = self.service.clock().local_now();
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };
        if !schedule.due(now) {
            return false;
        }
        let summary = match self.service.dashboard_summary().await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "daily summary: could not load dashboard");
                return false;
            }
        };
        let message = render::daily_summary(&summary, self.settings.mention_user.as_deref());
        match self.transport.send(&message).await {
            Ok(()) => {
                schedule.mark_sent(now);
                info!(date = %now.date(), "daily summary sent");
                true
            }
            Err(e) => {
                warn!(error = %e, "daily summary not delivered");
                false
            }
        }
    }

    /// Poll until `shutdown` resolves.
    ///
    /// Transport and storage failures are logged and the loop carries on.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        if self.settings.startup_report
            && let Err(e) = self.send_startup_report().await
        {
            warn!(error = %e, "startup report not delivered");
        }

        info!(
            interval_secs = self.settings.poll_interval.as_secs(),
            fetch_limit = self.settings.fetch_limit,
            "polling started"
        );
        tokio::pin!(shutdown);
        loop {
            match self.poll_once().await {
                Ok(0) => {}
                Ok(handled) => debug!(handled, watermark = self.last_processed, "cycle complete"),
                Err(e) => warn!(error = %e, "fetch failed, skipping cycle"),
            }
            self.send_daily_summary_if_due().await;

            tokio::select! {
                () = &mut shutdown => {
                    info!(watermark = self.last_processed, "shutdown requested, polling stopped");
                    break;
                }
                () = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }
    }
}
