use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ListScope, Priority, TaskStatus};
use crate::errors::CoreError;

/// Date format accepted for `start_date` and `due_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_STORY_POINTS: u32 = 1;
pub const DEFAULT_IMPACT_SCORE: i64 = 3;
pub const DEFAULT_ENERGY_REQUIRED: i64 = 2;

/// A persisted task.
///
/// `title_generated` is fixed at creation from project, module, layer, type,
/// and raw title. `execution_score` is derived and rewritten whenever the
/// status or a scoring input changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub project: String,
    pub module: Option<String>,
    pub layer: Option<String>,
    #[serde(rename = "type")]
    pub task_type: String,
    pub title_raw: String,
    pub title_generated: String,
    pub priority: Priority,
    pub story_points: u32,
    pub epic: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub impact_score: i64,
    pub energy_required: i64,
    pub execution_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Parsed due date, `None` when absent or not `YYYY-MM-DD`.
    #[must_use]
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_date)
    }

    /// Whether the task is unfinished and its due date lies before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_done() && self.due().is_some_and(|due| due < today)
    }
}

/// Input for creating a task. Optional fields fall back to the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub project: String,
    pub module: Option<String>,
    pub layer: Option<String>,
    pub task_type: String,
    pub title_raw: String,
    pub priority: Option<Priority>,
    pub story_points: Option<u32>,
    pub epic: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub impact_score: Option<i64>,
    pub energy_required: Option<i64>,
    pub status: Option<TaskStatus>,
}

impl NewTask {
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        task_type: impl Into<String>,
        title_raw: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            project: project.into(),
            task_type: task_type.into(),
            title_raw: title_raw.into(),
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Trim every text field, drop blank optionals, and check required fields
    /// and value constraints.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first missing or invalid field.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.project = self.project.trim().to_string();
        self.task_type = self.task_type.trim().to_string();
        self.title_raw = self.title_raw.trim().to_string();
        for field in [
            &mut self.module,
            &mut self.layer,
            &mut self.epic,
            &mut self.description,
            &mut self.start_date,
            &mut self.due_date,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }

        for (name, value) in [
            ("project", &self.project),
            ("type", &self.task_type),
            ("title", &self.title_raw),
        ] {
            if value.is_empty() {
                return Err(missing(name));
            }
        }
        if self.priority.is_none() {
            return Err(missing("priority"));
        }

        for (name, value) in [
            ("start_date", &self.start_date),
            ("due_date", &self.due_date),
        ] {
            if let Some(raw) = value
                && parse_date(raw).is_none()
            {
                return Err(CoreError::Validation(format!(
                    "invalid {name} '{raw}' (expected YYYY-MM-DD)"
                )));
            }
        }

        for (name, value) in [
            ("impact_score", self.impact_score),
            ("energy_required", self.energy_required),
        ] {
            if value.is_some_and(|v| v < 0) {
                return Err(CoreError::Validation(format!(
                    "{name} must be a non-negative integer"
                )));
            }
        }

        Ok(self)
    }

    /// Display title derived from the classification fields.
    #[must_use]
    pub fn generated_title(&self) -> String {
        generate_title(
            &self.project,
            self.module.as_deref(),
            self.layer.as_deref(),
            &self.task_type,
            &self.title_raw,
        )
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::Validation(format!("missing required field: {field}"))
}

/// Format the display title: `([Project] [Module] [Layer] [Type] Title)`.
///
/// Module and layer segments are omitted when absent.
#[must_use]
pub fn generate_title(
    project: &str,
    module: Option<&str>,
    layer: Option<&str>,
    task_type: &str,
    title_raw: &str,
) -> String {
    let mut out = String::from("(");
    for segment in std::iter::once(project)
        .chain(module)
        .chain(layer)
        .chain(std::iter::once(task_type))
    {
        out.push('[');
        out.push_str(segment);
        out.push_str("] ");
    }
    out.push_str(title_raw);
    out.push(')');
    out
}

/// Parse a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Optional status/keyword/scope filter for task listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub scope: Option<ListScope>,
    pub keyword: Option<String>,
}

impl TaskFilter {
    #[must_use]
    pub fn scope(scope: ListScope) -> Self {
        Self {
            scope: Some(scope),
            keyword: None,
        }
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: Option<&str>) -> Self {
        self.keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase);
        self
    }

    /// Case-insensitive keyword match across title, project, description,
    /// type, and priority, combined with the scope.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(scope) = self.scope
            && !scope.includes(task.status)
        {
            return false;
        }
        let Some(keyword) = self.keyword.as_deref() else {
            return true;
        };
        let keyword = keyword.to_lowercase();
        [
            task.title_raw.as_str(),
            task.project.as_str(),
            task.description.as_deref().unwrap_or_default(),
            task.task_type.as_str(),
            task.priority.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_task() -> Task {
        let now = Utc::now();
        Task {
            id: 1,
            project: "Edlink".into(),
            module: None,
            layer: None,
            task_type: "Bug".into(),
            title_raw: "Fix login bug".into(),
            title_generated: "([Edlink] [Bug] Fix login bug)".into(),
            priority: Priority::High,
            story_points: 3,
            epic: None,
            description: Some("Session cookie expires early".into()),
            start_date: None,
            due_date: None,
            status: TaskStatus::Todo,
            impact_score: 3,
            energy_required: 2,
            execution_score: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn title_without_module_and_layer() {
        assert_eq!(
            generate_title("Edlink", None, None, "Bug", "Fix login bug"),
            "([Edlink] [Bug] Fix login bug)"
        );
    }

    #[test]
    fn title_with_module_and_layer() {
        assert_eq!(
            generate_title("Edlink", Some("Auth"), Some("Backend"), "Bug", "Fix login"),
            "([Edlink] [Auth] [Backend] [Bug] Fix login)"
        );
    }

    #[test]
    fn normalized_trims_and_drops_blank_optionals() {
        let mut input = NewTask::new("  Edlink ", " Bug", "Fix login bug  ", Priority::High);
        input.module = Some("   ".into());
        input.description = Some(" details ".into());

        let task = input.normalized().unwrap();
        assert_eq!(task.project, "Edlink");
        assert_eq!(task.task_type, "Bug");
        assert_eq!(task.title_raw, "Fix login bug");
        assert_eq!(task.module, None);
        assert_eq!(task.description.as_deref(), Some("details"));
    }

    #[test]
    fn normalized_reports_first_missing_field() {
        let err = NewTask::new("Edlink", "", "", Priority::Low)
            .normalized()
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: missing required field: type");
    }

    #[test]
    fn normalized_requires_priority() {
        let input = NewTask {
            project: "Edlink".into(),
            task_type: "Bug".into(),
            title_raw: "Fix".into(),
            ..NewTask::default()
        };
        let err = input.normalized().unwrap_err();
        assert!(err.to_string().contains("missing required field: priority"));
    }

    #[test]
    fn normalized_rejects_bad_due_date() {
        let mut input = NewTask::new("Edlink", "Bug", "Fix", Priority::Low);
        input.due_date = Some("16/10/2026".into());
        let err = input.normalized().unwrap_err();
        assert!(err.to_string().contains("invalid due_date '16/10/2026'"));
    }

    #[test]
    fn normalized_rejects_negative_impact() {
        let mut input = NewTask::new("Edlink", "Bug", "Fix", Priority::Low);
        input.impact_score = Some(-1);
        assert!(input.normalized().is_err());
    }

    #[test]
    fn overdue_requires_unfinished_past_due() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut task = sample_task();
        task.due_date = Some("2026-10-15".into());
        assert!(task.is_overdue(today));

        task.status = TaskStatus::Done;
        assert!(!task.is_overdue(today));

        task.status = TaskStatus::Todo;
        task.due_date = Some("not-a-date".into());
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn filter_keyword_is_case_insensitive_across_fields() {
        let task = sample_task();
        for keyword in ["LOGIN", "edlink", "cookie", "bug", "HIGH"] {
            let filter = TaskFilter::default().with_keyword(Some(keyword));
            assert!(filter.matches(&task), "keyword {keyword} should match");
        }
        let filter = TaskFilter::default().with_keyword(Some("payments"));
        assert!(!filter.matches(&task));
    }

    #[test]
    fn filter_combines_scope_and_keyword() {
        let task = sample_task();
        let filter = TaskFilter::scope(ListScope::Done).with_keyword(Some("login"));
        assert!(!filter.matches(&task));
        let filter = TaskFilter::scope(ListScope::Active).with_keyword(Some("login"));
        assert!(filter.matches(&task));
    }

    #[test]
    fn task_serializes_type_field() {
        let json = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(json["type"], "Bug");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["status"], "todo");
    }
}
