//! Task repository: parameterized CRUD plus the report queries.
//!
//! Methods here store exactly what they are given. Validation, title
//! generation and scoring belong to [`crate::TaskService`].

use chrono::{DateTime, NaiveDate, Utc};
use pte_core::entities::{DATE_FORMAT, DEFAULT_ENERGY_REQUIRED, DEFAULT_IMPACT_SCORE};
use pte_core::entities::{DEFAULT_STORY_POINTS, NewTask, Task};
use pte_core::enums::{ListScope, Priority, TaskStatus};

use crate::PteDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_priority, parse_status};

const SELECT_COLS: &str = "id, project, module, layer, type, title_raw, title_generated, \
     priority, story_points, epic, description, start_date, due_date, status, impact_score, \
     energy_required, execution_score, created_at, updated_at";

/// Newest-created first; id breaks ties between rows created in the same instant.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, id DESC";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    let story_points = row.get::<i64>(8)?;
    Ok(Task {
        id: row.get(0)?,
        project: row.get(1)?,
        module: get_opt_string(row, 2)?,
        layer: get_opt_string(row, 3)?,
        task_type: row.get(4)?,
        title_raw: row.get(5)?,
        title_generated: row.get(6)?,
        priority: parse_priority(&row.get::<String>(7)?),
        story_points: u32::try_from(story_points).map_err(|_| {
            DatabaseError::InvalidState(format!("story_points out of range: {story_points}"))
        })?,
        epic: get_opt_string(row, 9)?,
        description: get_opt_string(row, 10)?,
        start_date: get_opt_string(row, 11)?,
        due_date: get_opt_string(row, 12)?,
        status: parse_status(&row.get::<String>(13)?)?,
        impact_score: row.get(14)?,
        energy_required: row.get(15)?,
        execution_score: row.get(16)?,
        created_at: parse_datetime(&row.get::<String>(17)?)?,
        updated_at: parse_datetime(&row.get::<String>(18)?)?,
    })
}

/// Status values covered by `scope`, or `None` when no status filter applies.
fn scope_statuses(scope: ListScope) -> Option<Vec<&'static str>> {
    if scope == ListScope::All {
        return None;
    }
    Some(
        TaskStatus::ALL
            .into_iter()
            .filter(|s| scope.includes(*s))
            .map(TaskStatus::as_str)
            .collect(),
    )
}

impl PteDb {
    /// Insert a task and return the id assigned by storage.
    ///
    /// `input` is expected to be normalized; absent optionals are stored with
    /// their documented defaults.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn insert_task(
        &self,
        input: &NewTask,
        title_generated: &str,
        execution_score: f64,
        now: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        let stamp = format_datetime(now);
        self.conn
            .execute(
                "INSERT INTO tasks (project, module, layer, type, title_raw, title_generated, \
                 priority, story_points, epic, description, start_date, due_date, status, \
                 impact_score, energy_required, execution_score, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                libsql::params![
                    input.project.as_str(),
                    input.module.as_deref(),
                    input.layer.as_deref(),
                    input.task_type.as_str(),
                    input.title_raw.as_str(),
                    title_generated,
                    input.priority.unwrap_or(Priority::Medium).as_str(),
                    i64::from(input.story_points.unwrap_or(DEFAULT_STORY_POINTS)),
                    input.epic.as_deref(),
                    input.description.as_deref(),
                    input.start_date.as_deref(),
                    input.due_date.as_deref(),
                    input.status.unwrap_or(TaskStatus::Todo).as_str(),
                    input.impact_score.unwrap_or(DEFAULT_IMPACT_SCORE),
                    input.energy_required.unwrap_or(DEFAULT_ENERGY_REQUIRED),
                    execution_score,
                    stamp.as_str(),
                    stamp.as_str()
                ],
            )
            .await?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch one task by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be read.
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_task(&row)?)),
            None => Ok(None),
        }
    }

    /// List tasks in `scope` (all when `None`), newest-created first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_tasks(&self, scope: Option<ListScope>) -> Result<Vec<Task>, DatabaseError> {
        match scope.and_then(scope_statuses) {
            None => {
                self.query_tasks(&format!("SELECT {SELECT_COLS} FROM tasks {NEWEST_FIRST}"), ())
                    .await
            }
            Some(statuses) => {
                let placeholders: Vec<String> =
                    (1..=statuses.len()).map(|i| format!("?{i}")).collect();
                let sql = format!(
                    "SELECT {SELECT_COLS} FROM tasks WHERE status IN ({}) {NEWEST_FIRST}",
                    placeholders.join(", ")
                );
                self.query_tasks(&sql, libsql::params_from_iter(statuses))
                    .await
            }
        }
    }

    /// Set status, score and `updated_at`. Returns affected rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn update_status(
        &self,
        id: i64,
        status: TaskStatus,
        execution_score: f64,
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        Ok(self
            .conn
            .execute(
                "UPDATE tasks SET status = ?1, execution_score = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params![status.as_str(), execution_score, format_datetime(now), id],
            )
            .await?)
    }

    /// Overwrite the stored execution score. Returns affected rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn update_execution_score(&self, id: i64, score: f64) -> Result<u64, DatabaseError> {
        Ok(self
            .conn
            .execute(
                "UPDATE tasks SET execution_score = ?1 WHERE id = ?2",
                libsql::params![score, id],
            )
            .await?)
    }

    /// Hard delete. Returns affected rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_task(&self, id: i64) -> Result<u64, DatabaseError> {
        Ok(self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .await?)
    }

    /// Unfinished tasks due before `today`, earliest due date first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_overdue_tasks(&self, today: NaiveDate) -> Result<Vec<Task>, DatabaseError> {
        self.query_tasks(
            &format!(
                "SELECT {SELECT_COLS} FROM tasks \
                 WHERE due_date IS NOT NULL AND due_date != '' AND due_date < ?1 \
                 AND status != 'done' ORDER BY due_date ASC, id ASC"
            ),
            [today.format(DATE_FORMAT).to_string()],
        )
        .await
    }

    /// The `todo` task created earliest.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_oldest_todo(&self) -> Result<Option<Task>, DatabaseError> {
        let mut tasks = self
            .query_tasks(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks WHERE status = 'todo' \
                     ORDER BY created_at ASC, id ASC LIMIT 1"
                ),
                (),
            )
            .await?;
        Ok(tasks.pop())
    }

    /// Done tasks last updated on or after `start`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_done_since(&self, start: NaiveDate) -> Result<Vec<Task>, DatabaseError> {
        self.query_tasks(
            &format!(
                "SELECT {SELECT_COLS} FROM tasks WHERE status = 'done' AND updated_at >= ?1 \
                 ORDER BY updated_at DESC, id DESC"
            ),
            [start.format(DATE_FORMAT).to_string()],
        )
        .await
    }

    async fn query_tasks(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self.conn.query(sql, params).await?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }
}
