//! Priority, status, and list-scope enums.
//!
//! All enums serialize as `snake_case` text, which is also the form stored in
//! SQL. `FromStr` implementations are case-insensitive because both the CLI
//! and the chat parser accept free-form user input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Weight contributed to the execution score.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 3,
            Self::High => 5,
            Self::Urgent => 8,
        }
    }

    /// Display rank, most pressing first (urgent = 1).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Urgent => 1,
            Self::High => 2,
            Self::Medium => 3,
            Self::Low => 4,
        }
    }

    /// One-letter code used in compact tables.
    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Self::Urgent => "U",
            Self::High => "H",
            Self::Medium => "M",
            Self::Low => "L",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid priority '{s}' (expected low, medium, high, or urgent)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task.
///
/// ```text
/// todo ⇄ in_progress ⇄ done
/// ```
///
/// Any status may be set from any other; the score is recomputed on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    #[serde(alias = "doing")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Upper-case label for chat and table output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN PROGRESS",
            Self::Done => "DONE",
        }
    }

    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(CoreError::Validation(format!(
                "invalid status '{s}' (expected todo, in_progress, or done)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ListScope
// ---------------------------------------------------------------------------

/// Named task filter used by list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListScope {
    All,
    Active,
    Todo,
    Progress,
    Done,
}

impl ListScope {
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Active,
        Self::Todo,
        Self::Progress,
        Self::Done,
    ];

    /// Whether a task with `status` falls inside this scope.
    #[must_use]
    pub const fn includes(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => !status.is_done(),
            Self::Todo => matches!(status, TaskStatus::Todo),
            Self::Progress => matches!(status, TaskStatus::InProgress),
            Self::Done => status.is_done(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Todo => "todo",
            Self::Progress => "progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid scope '{s}' (expected all, active, todo, progress, or done)"
                ))
            })
    }
}
