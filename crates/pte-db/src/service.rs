//! Task service: domain rules over the task store.
//!
//! `TaskService` wraps `PteDb` and a [`Clock`]. Every mutation stamps
//! `updated_at` from the clock and rewrites `execution_score`, so a stored
//! score always matches the task's current fields as of the last write.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use pte_core::clock::{Clock, SystemClock};
use pte_core::entities::{NewTask, Task, TaskFilter};
use pte_core::enums::TaskStatus;
use pte_core::errors::CoreError;
use pte_core::scoring::{self, ScoreInputs};
use pte_core::summary::{self, DashboardSummary, WeeklyReport};
use tracing::{debug, info};

use crate::PteDb;
use crate::error::ServiceError;

pub struct TaskService {
    db: PteDb,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    /// Open a local database (migrating it) with the system clock.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, ServiceError> {
        let db = PteDb::open_local(path).await?;
        Ok(Self::new(db, Arc::new(SystemClock)))
    }

    #[must_use]
    pub fn new(db: PteDb, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    #[must_use]
    pub const fn db(&self) -> &PteDb {
        &self.db
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Validate, title, score and persist a new task. Returns the new id.
    ///
    /// # Errors
    ///
    /// `ServiceError::Core` (validation) naming the first missing or invalid
    /// field; `ServiceError::Storage` if the insert fails.
    pub async fn create_task(&self, input: NewTask) -> Result<i64, ServiceError> {
        let input = input.normalized()?;
        let title = input.generated_title();
        let score = scoring::execution_score(ScoreInputs::from(&input), self.clock.today());
        let id = self
            .db
            .insert_task(&input, &title, score, self.clock.now())
            .await?;
        info!(task_id = id, score, title = %title, "task created");
        Ok(id)
    }

    /// Change a task's status and recompute its score.
    ///
    /// Returns affected rows: 0 when no task has `id`, otherwise 1.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` on persistence failure.
    pub async fn set_status(&self, id: i64, status: TaskStatus) -> Result<u64, ServiceError> {
        let Some(task) = self.db.get_task(id).await? else {
            debug!(task_id = id, "status change for missing task");
            return Ok(0);
        };
        let inputs = ScoreInputs {
            status,
            ..ScoreInputs::from(&task)
        };
        let score = scoring::execution_score(inputs, self.clock.today());
        let affected = self
            .db
            .update_status(id, status, score, self.clock.now())
            .await?;
        info!(task_id = id, from = %task.status, to = %status, score, "status changed");
        Ok(affected)
    }

    /// Hard delete. Returns affected rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` on persistence failure.
    pub async fn delete_task(&self, id: i64) -> Result<u64, ServiceError> {
        let affected = self.db.delete_task(id).await?;
        if affected > 0 {
            info!(task_id = id, "task deleted");
        }
        Ok(affected)
    }

    /// Tasks matching `filter`, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the query fails.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ServiceError> {
        let tasks = self.db.list_tasks(filter.scope).await?;
        Ok(tasks.into_iter().filter(|t| filter.matches(t)).collect())
    }

    /// Fetch one task.
    ///
    /// # Errors
    ///
    /// `ServiceError::Core` (not found) when absent.
    pub async fn get_task(&self, id: i64) -> Result<Task, ServiceError> {
        self.db
            .get_task(id)
            .await?
            .ok_or_else(|| CoreError::task_not_found(id).into())
    }

    /// Rescore every task against today's date. Returns the number rescored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if a read or write fails.
    pub async fn recalculate_all_scores(&self) -> Result<usize, ServiceError> {
        let today = self.clock.today();
        let tasks = self.db.list_tasks(None).await?;
        for task in &tasks {
            let score = scoring::score_task(task, today);
            self.db.update_execution_score(task.id, score).await?;
        }
        info!(count = tasks.len(), "scores recalculated");
        Ok(tasks.len())
    }

    /// Top `limit` unfinished tasks by stored score.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the query fails.
    pub async fn focus(&self, limit: usize) -> Result<Vec<Task>, ServiceError> {
        let tasks = self.db.list_tasks(None).await?;
        Ok(scoring::focus(&tasks, limit))
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the query fails.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ServiceError> {
        let tasks = self.db.list_tasks(None).await?;
        Ok(summary::dashboard(&tasks, self.clock.today()))
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the query fails.
    pub async fn weekly_report(&self) -> Result<WeeklyReport, ServiceError> {
        let now = self.clock.now();
        let done = self
            .db
            .get_done_since(summary::weekly_window_start(now.date_naive()))
            .await?;
        Ok(summary::weekly_report(&done, now))
    }

    /// Unfinished tasks due before today.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the query fails.
    pub async fn overdue_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        Ok(self.db.get_overdue_tasks(self.clock.today()).await?)
    }

    /// Tasks marked done on `day` (by `updated_at`).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the query fails.
    pub async fn completed_on(&self, day: NaiveDate) -> Result<Vec<Task>, ServiceError> {
        let done = self.db.get_done_since(day).await?;
        let next = day.checked_add_days(Days::new(1));
        Ok(done
            .into_iter()
            .filter(|t| next.is_none_or(|next| t.updated_at.date_naive() < next))
            .collect())
    }
}
