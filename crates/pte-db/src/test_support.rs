//! Shared test utilities for pte-db tests.

pub(crate) mod helpers {
    use std::sync::Arc;

    use pte_core::clock::FixedClock;
    use pte_core::entities::NewTask;
    use pte_core::enums::Priority;

    use crate::PteDb;
    use crate::service::TaskService;

    /// In-memory service with the clock frozen at midday on 2026-10-16.
    pub async fn test_service() -> TaskService {
        test_service_at(2026, 10, 16).await
    }

    pub async fn test_service_at(year: i32, month: u32, day: u32) -> TaskService {
        let db = PteDb::open_local(":memory:").await.unwrap();
        let clock = FixedClock::at_date(year, month, day).unwrap();
        TaskService::new(db, Arc::new(clock))
    }

    /// Create an `Edlink`/`Bug` task and return its id.
    pub async fn add_task(svc: &TaskService, title: &str, priority: Priority) -> i64 {
        svc.create_task(NewTask::new("Edlink", "Bug", title, priority))
            .await
            .unwrap()
    }
}
