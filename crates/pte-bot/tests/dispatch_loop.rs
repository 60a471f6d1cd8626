//! Polling cycle behaviour against an in-memory channel and database.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use pte_bot::{BotSettings, Dispatcher, WatermarkStore};
use pte_chat::{ChatMessage, MemoryTransport, OutboundMessage};
use pte_core::clock::FixedClock;
use pte_core::enums::TaskStatus;
use pte_db::{PteDb, TaskService};
use tempfile::TempDir;

async fn service() -> TaskService {
    let db = PteDb::open_local(":memory:").await.unwrap();
    TaskService::new(db, Arc::new(FixedClock::at_date(2026, 10, 16).unwrap()))
}

async fn dispatcher(dir: &TempDir) -> Dispatcher<MemoryTransport> {
    dispatcher_with(dir, BotSettings::default()).await
}

async fn dispatcher_with(dir: &TempDir, settings: BotSettings) -> Dispatcher<MemoryTransport> {
    Dispatcher::new(
        MemoryTransport::new(),
        service().await,
        WatermarkStore::new(dir.path().join("last_message_id.txt")),
        settings,
    )
}

fn add_block(title: &str) -> String {
    format!("!add\nproject=Edlink\ntype=Bug\npriority=High\ntitle={title}\nsp=3")
}

fn texts(sent: &[OutboundMessage]) -> Vec<String> {
    sent.iter().filter_map(|m| m.content.clone()).collect()
}

#[tokio::test]
async fn commands_run_in_id_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(105, "alice", &add_block("third"));
    bot.transport().push_user(101, "alice", &add_block("first"));
    bot.transport().push_user(103, "alice", &add_block("second"));

    assert_eq!(bot.poll_once().await.unwrap(), 3);
    assert_eq!(bot.last_processed(), 105);

    for (id, title) in [(1, "first"), (2, "second"), (3, "third")] {
        assert_eq!(bot.service().get_task(id).await.unwrap().title_raw, title);
    }
    let replies = texts(&bot.transport().take_sent());
    assert_eq!(replies.len(), 3);
    assert!(replies[0].contains("ID: 1"));
    assert!(replies[2].contains("Title: third"));
}

#[tokio::test]
async fn refetching_seen_messages_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(10, "alice", &add_block("once"));

    assert_eq!(bot.poll_once().await.unwrap(), 1);
    bot.transport().take_sent();

    assert_eq!(bot.poll_once().await.unwrap(), 0);
    assert!(bot.transport().sent().is_empty());
    let all = bot
        .service()
        .list_tasks(&pte_core::entities::TaskFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn watermark_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut bot = dispatcher(&dir).await;
        bot.transport().push_user(42, "alice", "!help");
        bot.poll_once().await.unwrap();
    }

    let mut bot = dispatcher(&dir).await;
    assert_eq!(bot.last_processed(), 42);
    bot.transport().push_user(42, "alice", "!help");
    bot.transport().push_user(43, "alice", "!help");
    assert_eq!(bot.poll_once().await.unwrap(), 1);
    assert_eq!(bot.last_processed(), 43);
}

#[tokio::test]
async fn ignores_bots_and_chatter() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push(ChatMessage {
        id: 7,
        author_id: "bot".into(),
        author_is_bot: true,
        content: "!help".into(),
    });
    bot.transport().push_user(8, "alice", "good morning");
    bot.transport().push_user(9, "alice", "help me !help");

    assert_eq!(bot.poll_once().await.unwrap(), 0);
    assert_eq!(bot.last_processed(), 0);
    assert!(bot.transport().sent().is_empty());
}

#[tokio::test]
async fn failed_command_still_advances_watermark() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(50, "alice", "!progress 42");

    assert_eq!(bot.poll_once().await.unwrap(), 1);
    assert_eq!(bot.last_processed(), 50);
    let replies = texts(&bot.transport().take_sent());
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("#042 not found"), "{}", replies[0]);

    let stored = WatermarkStore::new(dir.path().join("last_message_id.txt"));
    assert_eq!(stored.load(), 50);
}

#[tokio::test]
async fn malformed_commands_get_usage_replies() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(1, "alice", "!list");
    bot.transport().push_user(2, "alice", "!done abc");
    bot.transport().push_user(3, "alice", "!add\nproject=Edlink\ntype=Bug");

    assert_eq!(bot.poll_once().await.unwrap(), 3);
    let replies = texts(&bot.transport().take_sent());
    assert!(replies[0].contains("Usage: !list"));
    assert!(replies[1].contains("Usage: !done <id>"));
    assert!(replies[2].contains("priority"));
    assert!(replies[2].contains("!template add"));
}

#[tokio::test]
async fn status_commands_update_the_task() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(1, "alice", &add_block("wire it"));
    bot.transport().push_user(2, "alice", "!doing 1");
    bot.poll_once().await.unwrap();
    assert_eq!(
        bot.service().get_task(1).await.unwrap().status,
        TaskStatus::InProgress
    );

    bot.transport().push_user(3, "alice", "!DONE 1");
    bot.poll_once().await.unwrap();
    let task = bot.service().get_task(1).await.unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.execution_score, 0.0);
}

#[tokio::test]
async fn delete_needs_confirmation_from_requester() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(1, "alice", &add_block("doomed"));
    bot.transport().push_user(2, "alice", "!delete 1");
    bot.transport().push_user(3, "bob", "!confirm 1");
    bot.poll_once().await.unwrap();

    let replies = texts(&bot.transport().take_sent());
    assert!(replies[1].contains("!confirm 1"));
    assert!(replies[2].contains("Not authorized"));
    assert!(bot.pending().is_pending(1));
    assert!(bot.service().get_task(1).await.is_ok());

    bot.transport().push_user(4, "alice", "!confirm 1");
    bot.poll_once().await.unwrap();
    let replies = texts(&bot.transport().take_sent());
    assert!(replies[0].contains("deleted"));
    assert!(bot.pending().is_empty());
    assert!(bot.service().get_task(1).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn cancel_keeps_the_task() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(1, "alice", &add_block("keeper"));
    bot.transport().push_user(2, "alice", "!delete 1");
    bot.transport().push_user(3, "alice", "!cancel 1");
    bot.transport().push_user(4, "alice", "!confirm 1");
    bot.poll_once().await.unwrap();

    let replies = texts(&bot.transport().take_sent());
    assert!(replies[2].contains("cancelled"));
    assert!(replies[3].contains("No pending delete"));
    assert!(bot.service().get_task(1).await.is_ok());
}

#[tokio::test]
async fn delete_of_missing_task_records_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(1, "alice", "!delete 9");
    bot.poll_once().await.unwrap();

    let replies = texts(&bot.transport().take_sent());
    assert!(replies[0].contains("not found"));
    assert!(bot.pending().is_empty());
}

#[tokio::test]
async fn detail_and_list_replies() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(1, "alice", &add_block("Fix login bug"));
    bot.transport().push_user(2, "alice", "!detail 1");
    bot.transport().push_user(3, "alice", "!list active login");
    bot.transport().push_user(4, "alice", "!list done");
    bot.poll_once().await.unwrap();

    let sent = bot.transport().take_sent();
    assert_eq!(sent.len(), 4);
    let embed = sent[1].embed.as_ref().unwrap();
    assert_eq!(embed.title, "🆔 001 ([Edlink] [Bug] Fix login bug)");

    let active = sent[2].content.as_deref().unwrap();
    assert!(active.contains("TASK LIST (ACTIVE)"));
    assert!(active.contains("🆔 001"));
    let done = sent[3].content.as_deref().unwrap();
    assert!(done.contains("No tasks found"));
}

#[tokio::test]
async fn fetch_failure_skips_the_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.transport().push_user(1, "alice", "!help");
    bot.transport().fail_next_fetch();

    assert!(bot.poll_once().await.is_err());
    assert_eq!(bot.last_processed(), 0);
    assert_eq!(bot.poll_once().await.unwrap(), 1);
}

#[tokio::test]
async fn storage_failure_replies_and_moves_on() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    bot.service()
        .db()
        .conn()
        .execute("DROP TABLE tasks", ())
        .await
        .unwrap();
    bot.transport().push_user(5, "alice", &add_block("lost"));
    bot.transport().push_user(6, "alice", "!list all");

    assert_eq!(bot.poll_once().await.unwrap(), 2);
    assert_eq!(bot.last_processed(), 6);
    assert_eq!(
        texts(&bot.transport().take_sent()),
        vec![
            pte_bot::render::storage_failure(),
            pte_bot::render::storage_failure(),
        ]
    );

    let reloaded = WatermarkStore::new(dir.path().join("last_message_id.txt"));
    assert_eq!(reloaded.load(), 6);
}

#[tokio::test]
async fn startup_report_is_one_card() {
    let dir = tempfile::tempdir().unwrap();
    let settings = BotSettings {
        mention_user: Some("42".into()),
        ..BotSettings::default()
    };
    let mut bot = dispatcher_with(&dir, settings).await;
    bot.transport().push_user(1, "alice", &add_block("open item"));
    bot.poll_once().await.unwrap();
    bot.transport().take_sent();

    bot.send_startup_report().await.unwrap();
    let sent = bot.transport().take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content.as_deref(), Some("<@42>"));
    let embed = sent[0].embed.as_ref().unwrap();
    assert_eq!(embed.title, "🚀 Startup Catch-up");
    assert!(embed.fields[0].value.contains("open item"));
    assert_eq!(embed.footer.as_deref(), Some("Active: 1 • Done Yesterday: 0"));
}

#[tokio::test]
async fn daily_summary_goes_out_once() {
    let dir = tempfile::tempdir().unwrap();
    let settings = BotSettings {
        daily_summary_hour: Some(8),
        ..BotSettings::default()
    };
    let mut bot = dispatcher_with(&dir, settings).await;

    // The fixed clock reads 12:00, past the configured hour.
    assert!(bot.send_daily_summary_if_due().await);
    assert!(!bot.send_daily_summary_if_due().await);

    let sent = texts(&bot.transport().take_sent());
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("PERSONAL TASK DASHBOARD"));
}

#[tokio::test]
async fn no_daily_summary_without_hour() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = dispatcher(&dir).await;
    assert!(!bot.send_daily_summary_if_due().await);
}
