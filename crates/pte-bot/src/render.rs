//! Reply text and cards.
//!
//! Pure formatting: every function takes already-loaded data and returns
//! text, an [`Embed`], or ready-to-send messages. Length limits are applied
//! here or by [`OutboundMessage::to_payload`].

use pte_chat::limits::{MESSAGE_LIMIT, chunk, ellipsize};
use pte_chat::message::{COLOR_ERROR, COLOR_INFO};
use pte_chat::{Embed, EmbedField, OutboundMessage};
use pte_core::entities::{NewTask, Task};
use pte_core::enums::{ListScope, Priority, TaskStatus};
use pte_core::summary::{DashboardSummary, WeeklyReport};

use crate::command::{ParseError, TemplateKind};

const SEP: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━";
const ITEM_SEP: &str = "────────────────────────────";
const FOOTER: &str = "Personal Task Engine";

/// Cards shown per field in the startup report.
const STARTUP_HEAD: usize = 5;
const STARTUP_MORE: usize = 10;

fn build_box(title: &str, body: &str) -> String {
    [SEP, title, SEP, "", body, "", SEP].join("\n")
}

/// Zero-padded id as shown in cards.
#[must_use]
pub fn pad_id(id: i64) -> String {
    if id < 0 {
        "???".to_string()
    } else {
        format!("{id:03}")
    }
}

const fn priority_emoji(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "🟢",
        Priority::Medium => "🟡",
        Priority::High => "🔥",
        Priority::Urgent => "🚨",
    }
}

const fn status_emoji(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "🟢",
        TaskStatus::InProgress => "🟡",
        TaskStatus::Done => "🔵",
    }
}

/// Card accent by priority.
#[must_use]
pub const fn priority_color(priority: Priority) -> u32 {
    match priority {
        Priority::Low => 3_066_993,
        Priority::Medium => 16_705_372,
        Priority::High => 15_105_570,
        Priority::Urgent => COLOR_ERROR,
    }
}

fn upper(priority: Priority) -> String {
    priority.as_str().to_uppercase()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Two or three line summary of a task for list replies.
#[must_use]
pub fn task_card(task: &Task) -> String {
    let line1 = format!(
        "🆔 {} | {} {} | 📦 {} | 🏷️ {}",
        pad_id(task.id),
        priority_emoji(task.priority),
        upper(task.priority),
        ellipsize(&task.project, 20),
        ellipsize(&task.task_type, 12),
    );
    let line2 = format!(
        "{} {:<11} {}",
        status_emoji(task.status),
        task.status.label(),
        ellipsize(&task.title_raw, 60)
    );
    match task.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(desc) => format!("{line1}\n{line2}\n📝 {}", ellipsize(desc, 80)),
        None => format!("{line1}\n{line2}"),
    }
}

enum Block {
    Heading(&'static str),
    Card(String),
}

/// `!list` reply, split into one message per `page_size` cards.
///
/// The `all` scope groups cards under ACTIVE and COMPLETED headings. The last
/// message carries the totals footer. Any message still over the platform
/// limit is split on line boundaries.
#[must_use]
pub fn list_messages(
    scope: ListScope,
    keyword: Option<&str>,
    tasks: &[Task],
    page_size: usize,
) -> Vec<OutboundMessage> {
    let mut header = format!("📋  TASK LIST ({})", scope.as_str().to_uppercase());
    if let Some(keyword) = keyword {
        header.push_str(&format!(" \"{keyword}\""));
    }
    if tasks.is_empty() {
        return vec![OutboundMessage::text(build_box(&header, "📭 No tasks found."))];
    }

    let (active, done): (Vec<&Task>, Vec<&Task>) = tasks.iter().partition(|t| !t.status.is_done());
    let mut blocks = Vec::new();
    if scope == ListScope::All {
        if !active.is_empty() {
            blocks.push(Block::Heading("🟢 ACTIVE"));
            blocks.extend(active.iter().map(|t| Block::Card(task_card(t))));
        }
        if !done.is_empty() {
            blocks.push(Block::Heading("🔵 COMPLETED"));
            blocks.extend(done.iter().map(|t| Block::Card(task_card(t))));
        }
    } else {
        blocks.extend(tasks.iter().map(|t| Block::Card(task_card(t))));
    }

    let page_size = page_size.max(1);
    let mut pages: Vec<Vec<String>> = vec![Vec::new()];
    let mut cards_on_page = 0;
    for block in blocks {
        if cards_on_page == page_size {
            pages.push(Vec::new());
            cards_on_page = 0;
        }
        let Some(page) = pages.last_mut() else {
            continue;
        };
        match block {
            Block::Heading(heading) => page.push(format!("{heading}\n{ITEM_SEP}")),
            Block::Card(card) => {
                page.push(format!("{card}\n{ITEM_SEP}"));
                cards_on_page += 1;
            }
        }
    }

    let footer = match scope {
        ListScope::All => format!(
            "{SEP}\nTotal Active     : {}\nTotal Completed  : {}\nTotal All        : {}\n{SEP}",
            active.len(),
            done.len(),
            tasks.len()
        ),
        _ => format!("{SEP}\nTotal {} : {}\n{SEP}", title_case(scope.as_str()), tasks.len()),
    };

    let page_count = pages.len();
    pages
        .into_iter()
        .enumerate()
        .flat_map(|(i, lines)| {
            let title = if page_count > 1 {
                format!("{header} {}/{page_count}", i + 1)
            } else {
                header.clone()
            };
            let mut body = lines.join("\n");
            if i + 1 == page_count {
                body.push_str("\n\n");
                body.push_str(&footer);
            }
            chunk(&build_box(&title, &body), MESSAGE_LIMIT)
        })
        .map(OutboundMessage::text)
        .collect()
}

/// `!detail` card.
#[must_use]
pub fn detail_embed(task: &Task) -> Embed {
    let description = task
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("-");
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    let mut embed = Embed::new(
        format!("🆔 {} {}", pad_id(task.id), task.title_generated),
        description,
    )
    .color(priority_color(task.priority))
    .field(EmbedField::inline("Project", task.project.as_str()))
    .field(EmbedField::inline("Type", task.task_type.as_str()))
    .field(EmbedField::inline(
        "Priority",
        format!("{} {}", priority_emoji(task.priority), upper(task.priority)),
    ))
    .field(EmbedField::inline(
        "Status",
        format!("{} {}", status_emoji(task.status), task.status.label()),
    ));
    if task.module.is_some() || task.layer.is_some() {
        embed = embed
            .field(EmbedField::inline("Module", or_dash(task.module.as_deref())))
            .field(EmbedField::inline("Layer", or_dash(task.layer.as_deref())));
    }
    if let Some(epic) = &task.epic {
        embed = embed.field(EmbedField::inline("Epic", epic.as_str()));
    }
    embed
        .field(EmbedField::inline("Story Points", task.story_points.to_string()))
        .field(EmbedField::inline("Impact", task.impact_score.to_string()))
        .field(EmbedField::inline("Energy", task.energy_required.to_string()))
        .field(EmbedField::inline("Start", or_dash(task.start_date.as_deref())))
        .field(EmbedField::inline("Due", or_dash(task.due_date.as_deref())))
        .field(EmbedField::inline("Score", format!("{:.1}", task.execution_score)))
        .field(EmbedField::inline(
            "Created",
            task.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ))
        .field(EmbedField::inline(
            "Updated",
            task.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ))
        .footer(FOOTER)
}

/// Confirmation for `!add`.
#[must_use]
pub fn created(id: i64, task: &NewTask) -> String {
    format!(
        "✅ Task created (ID: {id})\nProject: {}\nType: {}\nTitle: {}\nPriority: {}\nStory Points: {}\nStatus: {}",
        task.project,
        task.task_type,
        task.title_raw,
        task.priority.unwrap_or(Priority::Medium),
        task.story_points.unwrap_or_default(),
        task.status.unwrap_or(TaskStatus::Todo),
    )
}

#[must_use]
pub fn status_changed(id: i64, status: TaskStatus) -> String {
    format!("✅ Task #{} is now {} {}", pad_id(id), status_emoji(status), status.label())
}

#[must_use]
pub fn not_found(id: i64) -> String {
    format!("❌ Task #{} not found.", pad_id(id))
}

#[must_use]
pub fn storage_failure() -> String {
    "❌ Could not complete the request because of a storage error. Try again later.".to_string()
}

#[must_use]
pub fn parse_failure(error: &ParseError) -> String {
    format!("❌ {error}")
}

#[must_use]
pub fn delete_prompt(task: &Task) -> String {
    format!(
        "⚠️ Delete task #{} {}?\nReply `!confirm {}` to delete it or `!cancel {}` to keep it.",
        pad_id(task.id),
        task.title_generated,
        task.id,
        task.id
    )
}

#[must_use]
pub fn deleted(id: i64) -> String {
    format!("🗑️ Task #{} deleted.", pad_id(id))
}

#[must_use]
pub fn delete_cancelled(id: i64) -> String {
    format!("↩️ Delete of task #{} cancelled.", pad_id(id))
}

#[must_use]
pub fn not_authorized(id: i64) -> String {
    format!(
        "⛔ Not authorized: only the user who requested the delete of task #{} can confirm or cancel it.",
        pad_id(id)
    )
}

#[must_use]
pub fn nothing_pending(id: i64) -> String {
    format!(
        "ℹ️ No pending delete for task #{}. Send `!delete {id}` first.",
        pad_id(id)
    )
}

#[must_use]
pub fn help() -> String {
    let body = [
        "!add            create a task (see !template add)",
        "!list <scope> [keyword]",
        "                scope: all, active, todo, progress, done",
        "!detail <id>    show one task",
        "!progress <id>  mark in progress",
        "!done <id>      mark done",
        "!todo <id>      move back to todo",
        "!delete <id>    ask to delete, then !confirm <id> or !cancel <id>",
        "!template add|update",
        "!help           this message",
    ]
    .join("\n");
    build_box("📖  COMMANDS", &format!("```\n{body}\n```"))
}

#[must_use]
pub fn template(kind: TemplateKind) -> String {
    match kind {
        TemplateKind::Add => build_box(
            "📝  TEMPLATE: ADD",
            "```\n!add\nproject=Edlink\ntype=Bug\npriority=High\ntitle=Fix login bug\nsp=3\ndesc=Optional description\n```\n\
             Required: project, type, priority, title\npriority: low, medium, high, urgent\nsp: non-negative integer (default 0)",
        ),
        TemplateKind::Update => build_box(
            "📝  TEMPLATE: UPDATE",
            "```\n!progress 12\n!done 12\n!todo 12\n```\nUse !detail <id> to check a task first.",
        ),
    }
}

/// Dashboard as plain text.
#[must_use]
pub fn dashboard_text(summary: &DashboardSummary) -> String {
    let mut lines = vec![
        "PERSONAL TASK DASHBOARD".to_string(),
        "-----------------------".to_string(),
        format!("Total: {}", summary.total_tasks),
        format!("Todo: {}", summary.total_todo),
        format!("In Progress: {}", summary.total_in_progress),
        format!("Done: {}", summary.total_done),
        format!("Overdue: {}", summary.total_overdue),
        format!("Average Score: {:.1}", summary.average_execution_score),
    ];
    if !summary.top_3.is_empty() {
        lines.push(String::new());
        lines.push("Top 3:".to_string());
        lines.extend(focus_lines(&summary.top_3));
    }
    if let Some(oldest) = &summary.oldest_todo {
        lines.push(String::new());
        lines.push(format!(
            "Oldest Todo: [ID {}] {} (since {})",
            oldest.id,
            oldest.title_generated,
            oldest.created_at.format("%Y-%m-%d")
        ));
    }
    lines.join("\n")
}

fn focus_lines(tasks: &[Task]) -> impl Iterator<Item = String> + '_ {
    tasks.iter().enumerate().map(|(i, t)| {
        format!(
            "{}. [ID {}] {} Score: {:.0} Due: {}",
            i + 1,
            t.id,
            t.title_generated,
            t.execution_score,
            t.due_date.as_deref().unwrap_or("-")
        )
    })
}

/// Focus list as plain text.
#[must_use]
pub fn focus_text(tasks: &[Task]) -> String {
    let mut lines = vec!["FOCUS TODAY".to_string(), "-----------".to_string()];
    if tasks.is_empty() {
        lines.push("(none)".to_string());
    }
    lines.extend(focus_lines(tasks));
    lines.join("\n")
}

/// Weekly report as plain text.
#[must_use]
pub fn weekly_text(report: &WeeklyReport) -> String {
    let mode = |value: &Option<String>| value.as_deref().map_or_else(|| "-".to_string(), title_case);
    [
        "WEEKLY PERFORMANCE REPORT".to_string(),
        "-------------------------".to_string(),
        format!("Tasks Completed (7d): {}", report.tasks_completed_7d),
        format!("Story Points Completed: {}", report.story_points_completed_7d),
        format!(
            "Average Completion Time: {:.1} days",
            report.average_completion_time_days
        ),
        format!("Most Common Priority: {}", mode(&report.most_common_priority)),
        format!("Most Common Type: {}", mode(&report.most_common_type)),
    ]
    .join("\n")
}

fn compact_line(task: &Task) -> String {
    format!(
        "#{} • {} {} • {} {} • 📦 {}\n{}",
        pad_id(task.id),
        priority_emoji(task.priority),
        upper(task.priority),
        status_emoji(task.status),
        task.status.label(),
        ellipsize(&task.project, 14),
        ellipsize(&task.title_raw, 40)
    )
}

fn compact_block(tasks: &[&Task], total: usize, shown_before: usize) -> String {
    if tasks.is_empty() {
        return "-".to_string();
    }
    let mut value = tasks.iter().map(|t| compact_line(t)).collect::<Vec<_>>().join("\n\n");
    let remaining = total.saturating_sub(shown_before + tasks.len());
    if remaining > 0 {
        value.push_str(&format!("\n\n... and {remaining} more"));
    }
    value
}

fn mention(user_id: Option<&str>) -> Option<String> {
    user_id.map(|id| format!("<@{id}>"))
}

/// Startup catch-up card: active tasks (already ranked) and yesterday's completions.
#[must_use]
pub fn startup_report(active: &[Task], done_yesterday: &[Task], user_id: Option<&str>) -> OutboundMessage {
    let active_refs: Vec<&Task> = active.iter().collect();
    let done_refs: Vec<&Task> = done_yesterday.iter().collect();
    let head = &active_refs[..active_refs.len().min(STARTUP_HEAD)];
    let more_end = active_refs.len().min(STARTUP_HEAD + STARTUP_MORE);
    let more = &active_refs[head.len()..more_end];
    let done_head = &done_refs[..done_refs.len().min(STARTUP_HEAD)];

    let head_total = if more.is_empty() { active.len() } else { head.len() };
    let mut embed = Embed::new("🚀 Startup Catch-up", "")
        .color(COLOR_INFO)
        .field(EmbedField::block(
            "Active Tasks",
            compact_block(head, head_total, 0),
        ));
    if !more.is_empty() {
        embed = embed.field(EmbedField::block(
            "Active Tasks (cont.)",
            compact_block(more, active.len(), head.len()),
        ));
    }
    embed = embed
        .field(EmbedField::block(
            "Done Yesterday",
            compact_block(done_head, done_yesterday.len(), 0),
        ))
        .footer(format!(
            "Active: {} • Done Yesterday: {}",
            active.len(),
            done_yesterday.len()
        ));

    let message = OutboundMessage::embed(embed);
    match mention(user_id) {
        Some(m) => message.with_content(m),
        None => message,
    }
}

/// Startup card shown when the task store could not be read.
#[must_use]
pub fn startup_failure(user_id: Option<&str>) -> OutboundMessage {
    let message = OutboundMessage::embed(
        Embed::new("🚀 Startup Catch-up", "⚠️ Could not load tasks.").color(COLOR_ERROR),
    );
    match mention(user_id) {
        Some(m) => message.with_content(m),
        None => message,
    }
}

/// Daily dashboard message with optional mention.
#[must_use]
pub fn daily_summary(summary: &DashboardSummary, user_id: Option<&str>) -> OutboundMessage {
    let text = match mention(user_id) {
        Some(m) => format!("{m}\n{}", dashboard_text(summary)),
        None => dashboard_text(summary),
    };
    OutboundMessage::text(format!("```\n{text}\n```"))
}
