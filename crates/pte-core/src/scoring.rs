//! Execution score: the urgency value used to rank tasks.
//!
//! ```text
//! score = priority_weight            low=1 medium=3 high=5 urgent=8
//!       + due_weight                 overdue=10 today=7 within 3 days=4
//!       + impact_score * 2
//!       + max(0, 5 - story_points)
//!       + 2 if in_progress
//! ```
//!
//! A done task always scores 0.

use chrono::NaiveDate;

use crate::entities::{NewTask, Task, parse_date};
use crate::entities::{DEFAULT_IMPACT_SCORE, DEFAULT_STORY_POINTS};
use crate::enums::{Priority, TaskStatus};

const OVERDUE_WEIGHT: u32 = 10;
const DUE_TODAY_WEIGHT: u32 = 7;
const DUE_SOON_WEIGHT: u32 = 4;
const DUE_SOON_DAYS: i64 = 3;
const SMALL_TASK_CEILING: u32 = 5;
const IN_PROGRESS_BONUS: f64 = 2.0;

/// Number of tasks surfaced by the focus view.
pub const FOCUS_LIMIT: usize = 3;

/// The fields the score depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreInputs<'a> {
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<&'a str>,
    pub impact_score: i64,
    pub story_points: u32,
}

impl<'a> From<&'a Task> for ScoreInputs<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            priority: task.priority,
            status: task.status,
            due_date: task.due_date.as_deref(),
            impact_score: task.impact_score,
            story_points: task.story_points,
        }
    }
}

impl<'a> From<&'a NewTask> for ScoreInputs<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            priority: task.priority.unwrap_or(Priority::Medium),
            status: task.status.unwrap_or(TaskStatus::Todo),
            due_date: task.due_date.as_deref(),
            impact_score: task.impact_score.unwrap_or(DEFAULT_IMPACT_SCORE),
            story_points: task.story_points.unwrap_or(DEFAULT_STORY_POINTS),
        }
    }
}

/// Compute the execution score relative to `today`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn execution_score(inputs: ScoreInputs<'_>, today: NaiveDate) -> f64 {
    if inputs.status.is_done() {
        return 0.0;
    }

    let base = inputs.priority.weight()
        + due_weight(inputs.due_date.and_then(parse_date), today)
        + SMALL_TASK_CEILING.saturating_sub(inputs.story_points);

    let mut score = f64::from(base) + inputs.impact_score.saturating_mul(2) as f64;
    if inputs.status == TaskStatus::InProgress {
        score += IN_PROGRESS_BONUS;
    }
    score.max(0.0)
}

/// Score a stored task.
#[must_use]
pub fn score_task(task: &Task, today: NaiveDate) -> f64 {
    execution_score(ScoreInputs::from(task), today)
}

/// Weight for due-date proximity. Absent dates contribute nothing.
#[must_use]
pub fn due_weight(due: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(due) = due else {
        return 0;
    };
    let days = (due - today).num_days();
    if days < 0 {
        OVERDUE_WEIGHT
    } else if days == 0 {
        DUE_TODAY_WEIGHT
    } else if days <= DUE_SOON_DAYS {
        DUE_SOON_WEIGHT
    } else {
        0
    }
}

/// Sort by stored execution score, highest first.
///
/// The sort is stable: equal scores keep their incoming order (newest-first
/// from storage), which keeps the focus output reproducible.
pub fn rank_by_score(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.execution_score.total_cmp(&a.execution_score));
}

/// Top `limit` unfinished tasks by execution score.
#[must_use]
pub fn focus(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut active: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.status.is_done())
        .cloned()
        .collect();
    rank_by_score(&mut active);
    active.truncate(limit);
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn inputs(priority: Priority, status: TaskStatus) -> ScoreInputs<'static> {
        ScoreInputs {
            priority,
            status,
            due_date: None,
            impact_score: 3,
            story_points: 1,
        }
    }

    fn task(id: i64, score: f64, status: TaskStatus) -> Task {
        let now = Utc::now();
        Task {
            id,
            project: "P".into(),
            module: None,
            layer: None,
            task_type: "Bug".into(),
            title_raw: format!("task {id}"),
            title_generated: format!("([P] [Bug] task {id})"),
            priority: Priority::Medium,
            story_points: 1,
            epic: None,
            description: None,
            start_date: None,
            due_date: None,
            status,
            impact_score: 3,
            energy_required: 2,
            execution_score: score,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[case(Priority::Low, 1.0 + 6.0 + 4.0)]
    #[case(Priority::Medium, 3.0 + 6.0 + 4.0)]
    #[case(Priority::High, 5.0 + 6.0 + 4.0)]
    #[case(Priority::Urgent, 8.0 + 6.0 + 4.0)]
    fn priority_weights(#[case] priority: Priority, #[case] expected: f64) {
        assert_eq!(execution_score(inputs(priority, TaskStatus::Todo), today()), expected);
    }

    #[rstest]
    #[case(Some("2026-10-10"), 10)]
    #[case(Some("2026-10-15"), 10)]
    #[case(Some("2026-10-16"), 7)]
    #[case(Some("2026-10-17"), 4)]
    #[case(Some("2026-10-19"), 4)]
    #[case(Some("2026-10-20"), 0)]
    #[case(Some("garbage"), 0)]
    #[case(None, 0)]
    fn due_weights(#[case] due: Option<&str>, #[case] expected: u32) {
        assert_eq!(due_weight(due.and_then(parse_date), today()), expected);
    }

    #[test]
    fn done_always_scores_zero() {
        let mut i = inputs(Priority::Urgent, TaskStatus::Done);
        i.due_date = Some("2020-01-01");
        i.impact_score = 10;
        assert_eq!(execution_score(i, today()), 0.0);
    }

    #[test]
    fn in_progress_adds_bonus() {
        let todo = execution_score(inputs(Priority::High, TaskStatus::Todo), today());
        let doing = execution_score(inputs(Priority::High, TaskStatus::InProgress), today());
        assert_eq!(doing - todo, 2.0);
    }

    #[test]
    fn large_story_points_do_not_go_negative() {
        let mut small = inputs(Priority::Low, TaskStatus::Todo);
        small.story_points = 0;
        let mut large = small;
        large.story_points = 13;
        assert_eq!(execution_score(small, today()), 1.0 + 6.0 + 5.0);
        assert_eq!(execution_score(large, today()), 1.0 + 6.0);
    }

    #[test]
    fn high_priority_three_points_scores_thirteen() {
        // high priority, 3 story points, default impact, no due date
        let i = ScoreInputs {
            priority: Priority::High,
            status: TaskStatus::Todo,
            due_date: None,
            impact_score: 3,
            story_points: 3,
        };
        assert_eq!(execution_score(i, today()), 5.0 + 6.0 + 2.0);
    }

    #[test]
    fn extreme_impact_saturates() {
        let new = NewTask {
            impact_score: Some(i64::MAX),
            ..NewTask::new("P", "Bug", "t", Priority::High)
        }
        .normalized()
        .unwrap();
        let score = execution_score(ScoreInputs::from(&new), today());
        assert!(score.is_finite());
        assert!(score >= i64::MAX as f64);
    }

    #[test]
    fn new_task_defaults_feed_the_score() {
        let new = NewTask::new("P", "Bug", "t", Priority::Medium);
        assert_eq!(execution_score(ScoreInputs::from(&new), today()), 3.0 + 6.0 + 4.0);
    }

    #[test]
    fn rank_is_stable_for_ties() {
        let mut tasks = vec![
            task(5, 10.0, TaskStatus::Todo),
            task(4, 12.0, TaskStatus::Todo),
            task(3, 10.0, TaskStatus::Todo),
            task(2, 12.0, TaskStatus::Todo),
        ];
        rank_by_score(&mut tasks);
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 2, 5, 3]);
    }

    #[test]
    fn focus_skips_done_and_limits() {
        let tasks = vec![
            task(1, 0.0, TaskStatus::Done),
            task(2, 9.0, TaskStatus::Todo),
            task(3, 15.0, TaskStatus::InProgress),
            task(4, 11.0, TaskStatus::Todo),
            task(5, 7.0, TaskStatus::Todo),
        ];
        let ids: Vec<i64> = focus(&tasks, FOCUS_LIMIT).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4, 2]);
    }
}
