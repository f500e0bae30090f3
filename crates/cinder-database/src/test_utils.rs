//! Test utilities for database integration tests
//!
//! Every [`TestDatabase`] is an isolated in-memory SQLite database with the
//! full migration set applied, so tests need no external services and no
//! cross-test cleanup.

use crate::DbConnection;
use cinder_migrations::Migrator;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, ExecResult, QueryResult, Statement,
};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// An isolated, fully-migrated in-memory database for one test.
pub struct TestDatabase {
    pub db: Arc<DbConnection>,
}

impl TestDatabase {
    /// Create a new test database and run all migrations.
    ///
    /// The pool is pinned to a single connection: each connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub async fn new() -> anyhow::Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open in-memory database: {}", e))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

        Ok(TestDatabase { db: Arc::new(db) })
    }

    /// Execute raw SQL for test setup.
    pub async fn execute_sql(&self, sql: &str) -> anyhow::Result<ExecResult> {
        let statement = Statement::from_string(DatabaseBackend::Sqlite, sql.to_owned());
        let result = self
            .db
            .execute(statement)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(result)
    }

    /// Query raw SQL and return the rows.
    pub async fn query_sql(&self, sql: &str) -> anyhow::Result<Vec<QueryResult>> {
        let statement = Statement::from_string(DatabaseBackend::Sqlite, sql.to_owned());
        let result = self
            .db
            .query_all(statement)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(result)
    }

    /// Get the database connection as Arc
    pub fn connection_arc(&self) -> Arc<DbConnection> {
        Arc::clone(&self.db)
    }
}
