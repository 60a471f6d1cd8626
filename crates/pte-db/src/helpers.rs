//! Row-to-entity parsing helpers.
//!
//! `libsql::Row` is column-indexed; these helpers isolate the conversions
//! between SQL text columns and typed values.

use chrono::{DateTime, SecondsFormat, Utc};
use pte_core::enums::{Priority, TaskStatus};
use tracing::warn;

use crate::error::DatabaseError;

/// Format a timestamp for storage.
///
/// Fixed-width microsecond RFC 3339 keeps lexical and chronological order equal.
#[must_use]
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 and `SQLite`'s `datetime('now')` format
/// (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a stored priority.
///
/// Rows written by older tools may carry free text; unknown values rank as
/// medium so scoring falls back to weight 3.
#[must_use]
pub fn parse_priority(s: &str) -> Priority {
    s.parse().unwrap_or_else(|_| {
        warn!(priority = s, "unknown stored priority, treating as medium");
        Priority::Medium
    })
}

/// Parse a stored status.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for a value outside the status set.
pub fn parse_status(s: &str) -> Result<TaskStatus, DatabaseError> {
    s.parse()
        .map_err(|_| DatabaseError::InvalidState(format!("unknown task status '{s}'")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}
