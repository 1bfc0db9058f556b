//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bonuspool_domain::{BonusPoolError, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection};
use tracing::info;

use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pooled SQLite connection.
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Database manager that wraps an r2d2 pool of SQLite connections.
#[derive(Debug)]
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let manager = SqliteConnectionManager::file(&path).with_init(|conn| apply_pragmas(conn));
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .map_err(|e| BonusPoolError::from(InfraError::from(e)))?;

        info!(
            db_path = %path.display(),
            max_connections = pool.max_size(),
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(|e| BonusPoolError::from(InfraError::from(e)))
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform a health check to verify database connectivity.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }
}

/// Per-connection pragmas: WAL for concurrent readers, enforced foreign
/// keys, and a busy timeout for lock contention.
fn apply_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;
         PRAGMA foreign_keys=ON;",
    )?;
    conn.busy_timeout(BUSY_TIMEOUT)
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        params![SCHEMA_VERSION],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

/// Convert a rusqlite error into the domain error.
pub(crate) fn map_sql_error(err: rusqlite::Error) -> BonusPoolError {
    BonusPoolError::from(InfraError::from(err))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn migrations_create_schema_version() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("manager created");
        manager.run_migrations().expect("migrations run");
        manager.run_migrations().expect("migrations are idempotent");

        let conn = manager.get_connection().expect("connection acquired");
        let version: i32 = conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
            .expect("schema version recorded");
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 2).expect("manager created");
        manager.run_migrations().expect("migrations run");

        manager.health_check().expect("health check passed");
        assert_eq!(manager.path(), db_path.as_path());
    }

    #[test]
    fn unreachable_path_fails_to_open() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("missing-dir").join("test.db");

        let result = DbManager::new(&db_path, 1);
        assert!(matches!(result, Err(BonusPoolError::Database(_) | BonusPoolError::Timeout(_))));
    }
}
