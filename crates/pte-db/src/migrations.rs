//! Database migration runner.
//!
//! Migration scripts are embedded at compile time and applied in name order.
//! The `migrations` ledger records each applied name; a script and its ledger
//! row commit in one transaction, so a failing script leaves no trace.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use crate::PteDb;
use crate::error::DatabaseError;

const LEDGER_DDL: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    applied_at TEXT NOT NULL
)";

/// Embedded migrations, sorted by name.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_tasks.sql",
        include_str!("../migrations/001_create_tasks.sql"),
    ),
    (
        "002_task_indexes.sql",
        include_str!("../migrations/002_task_indexes.sql"),
    ),
];

/// Applied and pending migration names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStatus {
    pub applied: Vec<String>,
    pub pending: Vec<String>,
}

impl PteDb {
    /// Apply every migration not yet recorded in the ledger.
    ///
    /// Returns the names applied during this call.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Migration` naming the failing script. Earlier
    /// scripts in the same run stay applied.
    pub async fn run_migrations(&self) -> Result<Vec<String>, DatabaseError> {
        self.ensure_ledger().await?;
        let applied = self.applied_migrations().await?;

        let mut applied_now = Vec::new();
        for (name, sql) in MIGRATIONS {
            if applied.iter().any(|a| a == name) {
                continue;
            }
            self.apply_migration(name, sql).await?;
            debug!(migration = name, "migration applied");
            applied_now.push((*name).to_string());
        }
        Ok(applied_now)
    }

    /// Report which embedded migrations have and have not been applied.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ledger cannot be read.
    pub async fn migration_status(&self) -> Result<MigrationStatus, DatabaseError> {
        self.ensure_ledger().await?;
        let applied = self.applied_migrations().await?;
        let pending = MIGRATIONS
            .iter()
            .map(|(name, _)| (*name).to_string())
            .filter(|name| !applied.contains(name))
            .collect();
        Ok(MigrationStatus { applied, pending })
    }

    async fn ensure_ledger(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute(LEDGER_DDL, ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("migrations ledger: {e}")))?;
        Ok(())
    }

    async fn applied_migrations(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT name FROM migrations ORDER BY name ASC", ())
            .await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }

    async fn apply_migration(&self, name: &str, sql: &str) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction().await?;
        let applied_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let result = async {
            tx.execute_batch(sql).await?;
            tx.execute(
                "INSERT INTO migrations (name, applied_at) VALUES (?1, ?2)",
                libsql::params![name, applied_at],
            )
            .await?;
            Ok::<_, libsql::Error>(())
        }
        .await;

        match result {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(e) => {
                tx.rollback().await?;
                Err(DatabaseError::Migration(format!("{name}: {e}")))
            }
        }
    }
}
