//! Shared test helpers for `PostgreSQL` integration tests.

use capability_directory::storage::adapters::postgres::PostgresBackend;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use std::error::Error;
use tokio::runtime::Runtime;

/// Boxed error returned by setup helpers.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// SQL to create the record table.
const CREATE_RECORDS_SQL: &str =
    include_str!("../../migrations/2026-01-01-000000_create_directory_records/up.sql");

/// SQL to drop the record table.
pub const DROP_RECORDS_SQL: &str =
    include_str!("../../migrations/2026-01-01-000000_create_directory_records/down.sql");

/// Template database name for pre-migrated schema.
const TEMPLATE_DB: &str = "capability_directory_test_template";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            execute_sql_statements(&mut conn, CREATE_RECORDS_SQL)?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Executes multiple SQL statements from a single string.
///
/// Splits on semicolons and skips empty or comment-only statements.
pub fn execute_sql_statements(conn: &mut PgConnection, sql: &str) -> eyre::Result<()> {
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() || trimmed.lines().all(|line| line.trim().starts_with("--")) {
            continue;
        }
        diesel::sql_query(trimmed)
            .execute(conn)
            .map_err(|e| eyre::eyre!("SQL error: {e}\nStatement: {trimmed}"))?;
    }
    Ok(())
}

/// Opens a direct connection to a test database.
pub fn connect(cluster: &TestCluster, db_name: &str) -> eyre::Result<PgConnection> {
    let url = cluster.connection().database_url(db_name);
    PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))
}

/// Creates a test database from template and returns a backend over it.
pub fn setup_backend(cluster: &TestCluster, db_name: &str) -> Result<PostgresBackend, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(PostgresBackend::new(pool))
}

fn cleanup_database(cluster: &TestCluster, db_name: &str) {
    if let Err(e) = cluster.drop_database(db_name) {
        eprintln!("Warning: failed to drop test database {db_name}: {e}");
    }
}

/// Guard that drops the test database even if the test panics.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    /// Guards `db_name` on `cluster`.
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        cleanup_database(self.cluster, &self.db_name);
    }
}
