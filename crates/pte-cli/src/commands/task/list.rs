use pte_core::entities::TaskFilter;
use pte_core::enums::{ListScope, TaskStatus};

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output_tasks;

pub async fn run(
    status: Option<&str>,
    scope: Option<&str>,
    search: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scope = match parse_opt::<TaskStatus>(status)? {
        Some(status) => Some(scope_for(status)),
        None => parse_opt::<ListScope>(scope)?,
    };
    let filter = TaskFilter {
        scope,
        keyword: None,
    }
    .with_keyword(search);

    let mut tasks = ctx.service.list_tasks(&filter).await?;
    tasks.truncate(effective_limit(limit, ctx.config.general.default_limit));
    output_tasks(&tasks, flags.format)
}

const fn scope_for(status: TaskStatus) -> ListScope {
    match status {
        TaskStatus::Todo => ListScope::Todo,
        TaskStatus::InProgress => ListScope::Progress,
        TaskStatus::Done => ListScope::Done,
    }
}

#[cfg(test)]
mod tests {
    use super::scope_for;
    use pte_core::enums::{ListScope, TaskStatus};

    #[test]
    fn status_maps_to_matching_scope() {
        for status in TaskStatus::ALL {
            let scope = scope_for(status);
            assert!(scope.includes(status));
            assert_ne!(scope, ListScope::All);
        }
    }
}
