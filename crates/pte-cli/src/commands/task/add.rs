use pte_core::entities::NewTask;
use pte_core::enums::{Priority, TaskStatus};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AddArgs;
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &AddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = new_task(args)?;
    let id = ctx.service.create_task(input).await?;
    let task = ctx.service.get_task(id).await?;
    output(&task, flags.format)
}

fn new_task(args: &AddArgs) -> anyhow::Result<NewTask> {
    Ok(NewTask {
        project: args.project.clone(),
        module: args.module.clone(),
        layer: args.layer.clone(),
        task_type: args.task_type.clone(),
        title_raw: args.title.clone(),
        priority: Some(args.priority.parse::<Priority>()?),
        story_points: args.story_points,
        epic: args.epic.clone(),
        description: args.description.clone(),
        start_date: args.start_date.clone(),
        due_date: args.due_date.clone(),
        impact_score: args.impact_score,
        energy_required: args.energy_required,
        status: parse_opt::<TaskStatus>(args.status.as_deref())?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(priority: &str) -> AddArgs {
        AddArgs {
            project: "Edlink".into(),
            task_type: "Bug".into(),
            title: "Fix login bug".into(),
            priority: priority.into(),
            module: None,
            layer: None,
            story_points: Some(3),
            epic: None,
            description: None,
            start_date: None,
            due_date: Some("2026-10-20".into()),
            impact_score: None,
            energy_required: None,
            status: None,
        }
    }

    #[test]
    fn maps_flags_onto_new_task() {
        let task = new_task(&args("High")).unwrap();
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.story_points, Some(3));
        assert_eq!(task.due_date.as_deref(), Some("2026-10-20"));
        assert_eq!(task.status, None);
    }

    #[test]
    fn rejects_unknown_priority() {
        let err = new_task(&args("critical")).unwrap_err();
        assert!(err.to_string().contains("invalid priority 'critical'"));
    }
}
