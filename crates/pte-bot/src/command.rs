//! Chat command parser.
//!
//! Turns one message into a [`Command`]. Verbs are case-insensitive. Parse
//! failures are returned as [`ParseError`] values carrying the text shown to
//! the user; nothing here panics on user input.
//!
//! ```text
//! !add                      !list <scope> [keyword]
//! project=Edlink            !detail <id>    !delete <id>
//! type=Bug                  !confirm <id>   !cancel <id>
//! priority=High             !progress <id>  !done <id>   !todo <id>
//! title=Fix login bug       !template add|update
//! sp=3                      !help
//! desc=optional
//! ```

use std::collections::HashMap;

use pte_core::entities::NewTask;
use pte_core::enums::{ListScope, Priority, TaskStatus};
use thiserror::Error;

/// Every verb the dispatcher reacts to.
pub const VERBS: [&str; 12] = [
    "!add",
    "!list",
    "!detail",
    "!delete",
    "!confirm",
    "!cancel",
    "!progress",
    "!done",
    "!todo",
    "!template",
    "!help",
    "!doing",
];

/// A validated chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NewTask),
    List {
        scope: ListScope,
        keyword: Option<String>,
    },
    Detail(i64),
    Delete(i64),
    Confirm(i64),
    Cancel(i64),
    SetStatus {
        id: i64,
        status: TaskStatus,
    },
    Template(TemplateKind),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Add,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not a known command at all.
    #[error("Unknown command format. Type !help to see the available commands.")]
    UnknownCommand,

    /// Known verb, wrong arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// `!add` block with a missing or invalid field.
    #[error("{0}. Type !template add for the expected format.")]
    InvalidTask(String),
}

/// Whether `text` starts with a recognized verb.
#[must_use]
pub fn is_command(text: &str) -> bool {
    verb(text).is_some_and(|v| VERBS.contains(&v.as_str()))
}

fn verb(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_lowercase)
}

/// Parse one chat message.
///
/// # Errors
///
/// Returns a [`ParseError`] describing what the user should send instead.
pub fn parse(text: &str) -> Result<Command, ParseError> {
    let Some(verb) = verb(text) else {
        return Err(ParseError::UnknownCommand);
    };
    let args: Vec<&str> = text.split_whitespace().skip(1).collect();

    match verb.as_str() {
        "!add" => parse_add(text).map(Command::Add),
        "!list" => parse_list(&args),
        "!detail" => task_id(&args, "!detail <id>").map(Command::Detail),
        "!delete" => task_id(&args, "!delete <id>").map(Command::Delete),
        "!confirm" => task_id(&args, "!confirm <id>").map(Command::Confirm),
        "!cancel" => task_id(&args, "!cancel <id>").map(Command::Cancel),
        "!progress" | "!doing" => status_change(&args, "!progress <id>", TaskStatus::InProgress),
        "!done" => status_change(&args, "!done <id>", TaskStatus::Done),
        "!todo" => status_change(&args, "!todo <id>", TaskStatus::Todo),
        "!template" => match args.first().map(|a| a.to_lowercase()).as_deref() {
            Some("add") => Ok(Command::Template(TemplateKind::Add)),
            Some("update") => Ok(Command::Template(TemplateKind::Update)),
            _ => Err(ParseError::Usage("!template add|update")),
        },
        "!help" => Ok(Command::Help),
        _ => Err(ParseError::UnknownCommand),
    }
}

fn task_id(args: &[&str], usage: &'static str) -> Result<i64, ParseError> {
    match args {
        [raw] => raw
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ParseError::Usage(usage)),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn status_change(
    args: &[&str],
    usage: &'static str,
    status: TaskStatus,
) -> Result<Command, ParseError> {
    task_id(args, usage).map(|id| Command::SetStatus { id, status })
}

const LIST_USAGE: &str = "!list <all|active|todo|progress|done> [keyword]";

fn parse_list(args: &[&str]) -> Result<Command, ParseError> {
    let Some((scope, rest)) = args.split_first() else {
        return Err(ParseError::Usage(LIST_USAGE));
    };
    let scope = scope
        .parse::<ListScope>()
        .map_err(|_| ParseError::Usage(LIST_USAGE))?;
    let keyword = Some(rest.join(" ")).filter(|k| !k.is_empty());
    Ok(Command::List { scope, keyword })
}

/// Parse the multi-line `!add` block.
///
/// The first non-empty line must be exactly `!add`; following `key=value`
/// lines are collected with lower-cased keys. Blank values are skipped and a
/// repeated key keeps its last value. Unknown keys are ignored.
fn parse_add(text: &str) -> Result<NewTask, ParseError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    if !lines.next().is_some_and(|first| first.eq_ignore_ascii_case("!add")) {
        return Err(ParseError::Usage(
            "!add on its own line, then key=value lines (see !template add)",
        ));
    }

    let mut fields: HashMap<String, String> = HashMap::new();
    for line in lines {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim().to_lowercase(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        fields.insert(key, value.to_string());
    }

    let mut take = |key: &str| fields.remove(key);
    let required = |value: Option<String>, name: &str| {
        value.ok_or_else(|| ParseError::InvalidTask(format!("missing required field: {name}")))
    };

    let project = required(take("project"), "project")?;
    let task_type = required(take("type"), "type")?;
    let priority_raw = required(take("priority"), "priority")?;
    let title = required(take("title"), "title")?;

    let priority = priority_raw.parse::<Priority>().map_err(|_| {
        ParseError::InvalidTask(format!(
            "invalid priority '{priority_raw}' (use low, medium, high, or urgent)"
        ))
    })?;

    let story_points = match take("sp") {
        None => 0,
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            ParseError::InvalidTask(format!("sp must be a non-negative integer, got '{raw}'"))
        })?,
    };

    Ok(NewTask {
        story_points: Some(story_points),
        description: take("desc"),
        ..NewTask::new(project, task_type, title, priority)
    })
}
