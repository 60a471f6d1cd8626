//! Startup catch-up report.

use chrono::Days;
use pte_chat::OutboundMessage;
use pte_core::entities::{Task, TaskFilter};
use pte_core::enums::ListScope;
use pte_db::{ServiceError, TaskService};
use tracing::warn;

use crate::render;

/// Unfinished tasks ordered by priority (urgent first), then newest first.
pub fn rank_active(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}

async fn load(service: &TaskService) -> Result<(Vec<Task>, Vec<Task>), ServiceError> {
    let mut active = service.list_tasks(&TaskFilter::scope(ListScope::Active)).await?;
    rank_active(&mut active);
    let today = service.clock().local_now().date();
    let done_yesterday = match today.checked_sub_days(Days::new(1)) {
        Some(yesterday) => service.completed_on(yesterday).await?,
        None => Vec::new(),
    };
    Ok((active, done_yesterday))
}

/// Build the catch-up card. A storage failure yields the error card instead.
pub async fn startup_report(service: &TaskService, mention: Option<&str>) -> OutboundMessage {
    match load(service).await {
        Ok((active, done)) => render::startup_report(&active, &done, mention),
        Err(e) => {
            warn!(error = %e, "startup report: could not load tasks");
            render::startup_failure(mention)
        }
    }
}
