//! Task store behaviour against an on-disk database.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use pte_core::clock::FixedClock;
use pte_core::entities::{NewTask, TaskFilter};
use pte_core::enums::{Priority, TaskStatus};
use pte_db::{PteDb, TaskService};

async fn service_at(path: &str) -> TaskService {
    let db = PteDb::open_local(path).await.unwrap();
    TaskService::new(db, Arc::new(FixedClock::at_date(2026, 10, 16).unwrap()))
}

#[tokio::test]
async fn tasks_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    let path = path.to_str().unwrap();

    let id = {
        let svc = service_at(path).await;
        let id = svc
            .create_task(NewTask::new("Edlink", "Feature", "Export CSV", Priority::Medium))
            .await
            .unwrap();
        svc.set_status(id, TaskStatus::InProgress).await.unwrap();
        id
    };

    let svc = service_at(path).await;
    let task = svc.get_task(id).await.unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.title_generated, "([Edlink] [Feature] Export CSV)");

    let status = svc.db().migration_status().await.unwrap();
    assert!(status.pending.is_empty());
    assert_eq!(status.applied.len(), 2);
}

#[tokio::test]
async fn reopening_does_not_reapply_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    let path = path.to_str().unwrap();

    PteDb::open_local(path).await.unwrap();
    let db = PteDb::open(path).await.unwrap();
    assert!(db.run_migrations().await.unwrap().is_empty());

    let svc = TaskService::new(db, Arc::new(FixedClock::at_date(2026, 1, 1).unwrap()));
    assert!(svc.list_tasks(&TaskFilter::default()).await.unwrap().is_empty());
}
