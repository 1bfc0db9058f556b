//! SQLite-backed employee directory.

use std::sync::Arc;

use async_trait::async_trait;
use bonuspool_core::EmployeeDirectory;
use bonuspool_domain::{Employee, Result as DomainResult, RoleCode};
use rusqlite::{params, Connection};
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

/// SQLite-backed employee directory.
pub struct SqliteEmployeeDirectory {
    db: Arc<DbManager>,
}

impl SqliteEmployeeDirectory {
    /// Create a new directory with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeDirectory for SqliteEmployeeDirectory {
    async fn list_active_employees(&self) -> DomainResult<Vec<Employee>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Employee>> {
            let conn = db.get_connection()?;
            query_active_employees(&conn)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn count_active_with_role(&self, role_code: RoleCode) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            count_role(&conn, role_code)
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn query_active_employees(conn: &Connection) -> DomainResult<Vec<Employee>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, role_code, is_active
             FROM employees
             WHERE is_active = 1
             ORDER BY name COLLATE NOCASE, id",
        )
        .map_err(map_sql_error)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Employee {
                id: row.get(0)?,
                name: row.get(1)?,
                role_code: row.get(2)?,
                is_active: row.get::<_, i64>(3)? != 0,
            })
        })
        .map_err(map_sql_error)?;

    rows.map(|row| row.map_err(map_sql_error)).collect()
}

/// Role codes are compared the way they are parsed: trimmed and
/// case-insensitive.
fn count_role(conn: &Connection, role_code: RoleCode) -> DomainResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM employees
             WHERE is_active = 1 AND lower(trim(role_code)) = ?1",
            params![role_code.as_code()],
            |row| row.get(0),
        )
        .map_err(map_sql_error)?;

    Ok(usize::try_from(count).unwrap_or_default())
}
