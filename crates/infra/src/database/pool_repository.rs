//! SQLite-backed monthly pool repository.
//!
//! One row per (year, month); writes upsert on that key so an existing pool
//! keeps its id. Decimal columns are stored as canonical text.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bonuspool_core::MonthlyPoolRepository;
use bonuspool_domain::{BonusPeriod, BonusPoolError, MonthlyPool, Result as DomainResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tokio::task;
use uuid::Uuid;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

const POOL_COLUMNS: &str =
    "id, year, month, total_bonus_pool_amount, total_revenue, pool_percentage, updated_at";

/// SQLite-backed monthly pool repository.
pub struct SqliteMonthlyPoolRepository {
    db: Arc<DbManager>,
}

impl SqliteMonthlyPoolRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn run<T, F>(&self, op: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> DomainResult<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<T> {
            let conn = db.get_connection()?;
            op(&conn)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl MonthlyPoolRepository for SqliteMonthlyPoolRepository {
    async fn fetch_pool(&self, period: BonusPeriod) -> DomainResult<Option<MonthlyPool>> {
        self.run(move |conn| query_pool(conn, period)).await
    }

    async fn persist_pool(&self, pool: MonthlyPool) -> DomainResult<MonthlyPool> {
        self.run(move |conn| upsert_pool(conn, &pool)).await
    }

    async fn delete_pool(&self, id: Uuid) -> DomainResult<()> {
        self.run(move |conn| {
            conn.execute("DELETE FROM monthly_pools WHERE id = ?1", params![id.to_string()])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
    }

    async fn list_pools(&self) -> DomainResult<Vec<MonthlyPool>> {
        self.run(query_all_pools).await
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn query_pool(conn: &Connection, period: BonusPeriod) -> DomainResult<Option<MonthlyPool>> {
    let raw = conn
        .query_row(
            &format!("SELECT {POOL_COLUMNS} FROM monthly_pools WHERE year = ?1 AND month = ?2"),
            params![period.year, period.month],
            read_row,
        )
        .optional()
        .map_err(map_sql_error)?;

    raw.map(PoolRow::into_pool).transpose()
}

fn upsert_pool(conn: &Connection, pool: &MonthlyPool) -> DomainResult<MonthlyPool> {
    conn.execute(
        "INSERT INTO monthly_pools
            (id, year, month, total_bonus_pool_amount, total_revenue, pool_percentage, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(year, month) DO UPDATE SET
            total_bonus_pool_amount = excluded.total_bonus_pool_amount,
            total_revenue = excluded.total_revenue,
            pool_percentage = excluded.pool_percentage,
            updated_at = excluded.updated_at",
        params![
            pool.id.to_string(),
            pool.year,
            pool.month,
            pool.total_bonus_pool_amount.normalize().to_string(),
            pool.total_revenue.normalize().to_string(),
            pool.pool_percentage.normalize().to_string(),
            pool.updated_at,
        ],
    )
    .map_err(map_sql_error)?;

    query_pool(conn, pool.period())?.ok_or_else(|| {
        BonusPoolError::Database(format!("pool for {} missing after upsert", pool.period()))
    })
}

fn query_all_pools(conn: &Connection) -> DomainResult<Vec<MonthlyPool>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {POOL_COLUMNS} FROM monthly_pools ORDER BY year DESC, month DESC"
        ))
        .map_err(map_sql_error)?;

    let rows = stmt.query_map([], read_row).map_err(map_sql_error)?;
    rows.map(|row| row.map_err(map_sql_error).and_then(PoolRow::into_pool)).collect()
}

/// Raw column values of one pool row.
struct PoolRow {
    id: String,
    year: i32,
    month: u32,
    total_bonus_pool_amount: String,
    total_revenue: String,
    pool_percentage: String,
    updated_at: i64,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<PoolRow> {
    Ok(PoolRow {
        id: row.get(0)?,
        year: row.get(1)?,
        month: row.get(2)?,
        total_bonus_pool_amount: row.get(3)?,
        total_revenue: row.get(4)?,
        pool_percentage: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl PoolRow {
    fn into_pool(self) -> DomainResult<MonthlyPool> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| BonusPoolError::Database(format!("invalid pool id '{}': {e}", self.id)))?;

        Ok(MonthlyPool {
            id,
            year: self.year,
            month: self.month,
            total_bonus_pool_amount: decimal_column("total_bonus_pool_amount", &self.total_bonus_pool_amount)?,
            total_revenue: decimal_column("total_revenue", &self.total_revenue)?,
            pool_percentage: decimal_column("pool_percentage", &self.pool_percentage)?,
            updated_at: self.updated_at,
        })
    }
}

fn decimal_column(column: &str, raw: &str) -> DomainResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| BonusPoolError::Database(format!("invalid {column} '{raw}': {e}")))
}
