//! # pte-db
//!
//! libSQL storage for the personal task engine.
//!
//! [`PteDb`] owns the connection, applies the embedded migrations and exposes
//! parameterized CRUD over the single `tasks` table (see [`repos`]).
//! [`TaskService`] layers the domain rules on top: validation, generated
//! titles, defaults and execution-score maintenance.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local-only mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

pub use error::{DatabaseError, ServiceError};
pub use migrations::MigrationStatus;
pub use service::TaskService;

use libsql::Builder;
use tracing::info;

/// Database handle for the task store.
///
/// One connection is opened and held for the lifetime of the handle.
pub struct PteDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl PteDb {
    /// Open a local database at the given path and apply pending migrations.
    ///
    /// Pass `":memory:"` for an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or a
    /// migration fails.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Self::open(path).await?;
        let applied = db.run_migrations().await?;
        if !applied.is_empty() {
            info!(path, applied = ?applied, "applied migrations");
        }
        Ok(db)
    }

    /// Open a local database without touching the schema.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        Ok(Self { db, conn })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
