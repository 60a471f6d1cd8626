//! Read-only aggregation over the task set: dashboard and weekly report.
//!
//! Builders are pure. Callers pass tasks in storage order (newest-created
//! first) and the reference time; nothing here touches the database.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use crate::entities::Task;
use crate::enums::TaskStatus;
use crate::scoring::{FOCUS_LIMIT, focus};

/// Window covered by the weekly report.
pub const WEEKLY_WINDOW_DAYS: u64 = 7;

/// Productivity dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_tasks: usize,
    pub total_todo: usize,
    pub total_in_progress: usize,
    pub total_done: usize,
    pub total_overdue: usize,
    pub average_execution_score: f64,
    pub top_3: Vec<Task>,
    pub oldest_todo: Option<Task>,
}

/// Completion report for the last seven days.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyReport {
    pub tasks_completed_7d: usize,
    pub story_points_completed_7d: u64,
    pub average_completion_time_days: f64,
    pub most_common_priority: Option<String>,
    pub most_common_type: Option<String>,
}

/// Build the dashboard for `today`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dashboard(tasks: &[Task], today: NaiveDate) -> DashboardSummary {
    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

    let active_scores: Vec<f64> = tasks
        .iter()
        .filter(|t| !t.status.is_done())
        .map(|t| t.execution_score)
        .collect();
    let average_execution_score = if active_scores.is_empty() {
        0.0
    } else {
        active_scores.iter().sum::<f64>() / active_scores.len() as f64
    };

    let oldest_todo = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Todo)
        .min_by_key(|t| (t.created_at, t.id))
        .cloned();

    DashboardSummary {
        total_tasks: tasks.len(),
        total_todo: count(TaskStatus::Todo),
        total_in_progress: count(TaskStatus::InProgress),
        total_done: count(TaskStatus::Done),
        total_overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        average_execution_score,
        top_3: focus(tasks, FOCUS_LIMIT),
        oldest_todo,
    }
}

/// First day included in the weekly window ending at `today`.
#[must_use]
pub fn weekly_window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(WEEKLY_WINDOW_DAYS))
        .unwrap_or(today)
}

/// Build the weekly report relative to `now`.
///
/// Done tasks whose `updated_at` falls on or after the window start count as
/// completed this week; completion time is `updated_at - created_at`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn weekly_report(tasks: &[Task], now: DateTime<Utc>) -> WeeklyReport {
    let start = weekly_window_start(now.date_naive());
    let mut done: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status.is_done() && t.updated_at.date_naive() >= start)
        .collect();
    done.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let durations: Vec<f64> = done
        .iter()
        .map(|t| (t.updated_at - t.created_at).num_seconds() as f64 / 86_400.0)
        .collect();
    let average_completion_time_days = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    };

    WeeklyReport {
        tasks_completed_7d: done.len(),
        story_points_completed_7d: done.iter().map(|t| u64::from(t.story_points)).sum(),
        average_completion_time_days,
        most_common_priority: most_common(done.iter().map(|t| t.priority.as_str().to_string())),
        most_common_type: most_common(done.iter().map(|t| t.task_type.to_lowercase())),
    }
}

/// Mode of `values`; ties go to the value seen first.
fn most_common(values: impl Iterator<Item = String>) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    let max = counts.iter().map(|(_, n)| *n).max()?;
    counts.into_iter().find(|(_, n)| *n == max).map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Priority;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn task(id: i64, status: TaskStatus, score: f64) -> Task {
        Task {
            id,
            project: "Edlink".into(),
            module: None,
            layer: None,
            task_type: "Bug".into(),
            title_raw: format!("task {id}"),
            title_generated: format!("([Edlink] [Bug] task {id})"),
            priority: Priority::Medium,
            story_points: 2,
            epic: None,
            description: None,
            start_date: None,
            due_date: None,
            status,
            impact_score: 3,
            energy_required: 2,
            execution_score: score,
            created_at: now() - Duration::days(10) + Duration::hours(id),
            updated_at: now() - Duration::days(1),
        }
    }

    #[test]
    fn dashboard_counts_and_average() {
        let mut overdue = task(4, TaskStatus::Todo, 20.0);
        overdue.due_date = Some("2026-10-01".into());
        let tasks = vec![
            overdue,
            task(3, TaskStatus::Done, 0.0),
            task(2, TaskStatus::InProgress, 14.0),
            task(1, TaskStatus::Todo, 11.0),
        ];

        let summary = dashboard(&tasks, now().date_naive());
        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.total_todo, 2);
        assert_eq!(summary.total_in_progress, 1);
        assert_eq!(summary.total_done, 1);
        assert_eq!(summary.total_overdue, 1);
        assert_eq!(summary.average_execution_score, 15.0);
        let top: Vec<i64> = summary.top_3.iter().map(|t| t.id).collect();
        assert_eq!(top, vec![4, 2, 1]);
        assert_eq!(summary.oldest_todo.map(|t| t.id), Some(1));
    }

    #[test]
    fn dashboard_on_empty_set() {
        let summary = dashboard(&[], now().date_naive());
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.average_execution_score, 0.0);
        assert!(summary.top_3.is_empty());
        assert!(summary.oldest_todo.is_none());
    }

    #[test]
    fn weekly_report_aggregates_recent_done() {
        let mut a = task(1, TaskStatus::Done, 0.0);
        a.priority = Priority::High;
        a.task_type = "Feature".into();
        let mut b = task(2, TaskStatus::Done, 0.0);
        b.priority = Priority::High;
        b.updated_at = now() - Duration::hours(2);
        let mut stale = task(3, TaskStatus::Done, 0.0);
        stale.updated_at = now() - Duration::days(9);
        let open = task(4, TaskStatus::Todo, 10.0);

        let report = weekly_report(&[a, b, stale, open], now());
        assert_eq!(report.tasks_completed_7d, 2);
        assert_eq!(report.story_points_completed_7d, 4);
        assert_eq!(report.most_common_priority.as_deref(), Some("high"));
        // "bug" (task 2) was updated most recently and wins the 1-1 tie.
        assert_eq!(report.most_common_type.as_deref(), Some("bug"));
        assert!(report.average_completion_time_days > 8.0);
    }

    #[test]
    fn weekly_report_without_completions() {
        let report = weekly_report(&[task(1, TaskStatus::Todo, 5.0)], now());
        assert_eq!(report.tasks_completed_7d, 0);
        assert_eq!(report.average_completion_time_days, 0.0);
        assert_eq!(report.most_common_priority, None);
        assert_eq!(report.most_common_type, None);
    }

    #[test]
    fn most_common_prefers_first_seen_on_tie() {
        let values = ["b", "a", "a", "b", "c"].into_iter().map(String::from);
        assert_eq!(most_common(values).as_deref(), Some("b"));
    }
}
