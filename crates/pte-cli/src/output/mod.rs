use pte_core::entities::Task;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a report: the label:value text in table mode, JSON otherwise.
pub fn output_report<T: Serialize>(
    value: &T,
    text: impl FnOnce(&T) -> String,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", text(value));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(value, format),
    }
}

/// Print tasks: a compact column set in table mode, full records otherwise.
pub fn output_tasks(tasks: &[Task], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_task_table(tasks));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(&tasks, format),
    }
}

const TASK_HEADERS: [&str; 7] = ["id", "pri", "status", "score", "sp", "due", "title"];

fn render_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return String::from("(no tasks)");
    }
    let rows = tasks
        .iter()
        .map(|task| {
            vec![
                task.id.to_string(),
                task.priority.short().to_string(),
                task.status.to_string(),
                format!("{:.1}", task.execution_score),
                task.story_points.to_string(),
                task.due_date.clone().unwrap_or_else(|| String::from("-")),
                task.title_generated.clone(),
            ]
        })
        .collect::<Vec<_>>();
    table::render_entity_table(&TASK_HEADERS, &rows, table::TableOptions::from_env())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table::TableOptions::from_env();

    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) if items.is_empty() => Ok(String::from("(no rows)")),
        Value::Array(items) => {
            let headers = ["value"];
            let rows = items.iter().map(|item| vec![value_to_cell(item)]).collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.is_empty() => String::from("-"),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
