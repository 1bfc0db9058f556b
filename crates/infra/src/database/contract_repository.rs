//! SQLite-backed signed contract repository.
//!
//! Reads contracts that reached the agreement-signed stage. All database
//! operations run in `spawn_blocking` to avoid blocking the async runtime.

use std::sync::Arc;

use async_trait::async_trait;
use bonuspool_core::SignedContractRepository;
use bonuspool_domain::constants::SIGNED_STAGE_CODE;
use bonuspool_domain::{parse_amount, BonusPoolError, Result as DomainResult, RoleCode, SignedContract};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_sql_error, DbManager};
use crate::errors::map_join_error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column index of the first slot column; slot columns follow
/// `RoleCode::CONTRACT_SLOTS` order.
const FIRST_SLOT_COLUMN: usize = 4;

/// SQLite-backed signed contract repository.
pub struct SqliteSignedContractRepository {
    db: Arc<DbManager>,
}

impl SqliteSignedContractRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SignedContractRepository for SqliteSignedContractRepository {
    async fn fetch_signed_contracts(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<SignedContract>> {
        let db = Arc::clone(&self.db);

        let contracts = task::spawn_blocking(move || -> DomainResult<Vec<SignedContract>> {
            let conn = db.get_connection()?;
            query_signed_contracts(&conn, from, to)
        })
        .await
        .map_err(map_join_error)??;

        debug!(%from, %to, count = contracts.len(), "signed contracts fetched");
        Ok(contracts)
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn query_signed_contracts(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> DomainResult<Vec<SignedContract>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, total_amount, currency_id, signed_date,
                    scheduler_id, manager_id, helper_closer_id, closer_id, expert_id, handler_id
             FROM signed_contracts
             WHERE stage_code = ?1 AND signed_date BETWEEN ?2 AND ?3
             ORDER BY signed_date, id",
        )
        .map_err(map_sql_error)?;

    let rows = stmt
        .query_map(
            params![
                SIGNED_STAGE_CODE,
                from.format(DATE_FORMAT).to_string(),
                to.format(DATE_FORMAT).to_string()
            ],
            read_row,
        )
        .map_err(map_sql_error)?;

    rows.map(|row| row.map_err(map_sql_error).and_then(build_contract)).collect()
}

/// Raw column values of one contract row.
struct ContractRow {
    id: String,
    total_amount: Option<String>,
    currency_id: String,
    signed_date: String,
    slots: Vec<(RoleCode, Option<String>)>,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ContractRow> {
    let slots = RoleCode::CONTRACT_SLOTS
        .iter()
        .enumerate()
        .map(|(offset, slot)| Ok((*slot, row.get::<_, Option<String>>(FIRST_SLOT_COLUMN + offset)?)))
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(ContractRow {
        id: row.get(0)?,
        total_amount: row.get(1)?,
        currency_id: row.get(2)?,
        signed_date: row.get(3)?,
        slots,
    })
}

fn build_contract(row: ContractRow) -> DomainResult<SignedContract> {
    let signed_date = NaiveDate::parse_from_str(row.signed_date.trim(), DATE_FORMAT).map_err(|e| {
        BonusPoolError::Database(format!(
            "contract {} has invalid signed_date '{}': {e}",
            row.id, row.signed_date
        ))
    })?;
    let amount = parse_amount(row.total_amount.as_deref().unwrap_or_default());

    let contract = SignedContract::new(row.id, amount, row.currency_id, signed_date);
    Ok(row
        .slots
        .into_iter()
        .filter_map(|(slot, employee)| {
            employee.filter(|id| !id.trim().is_empty()).map(|id| (slot, id))
        })
        .fold(contract, |contract, (slot, employee)| contract.with_assignment(slot, employee)))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    use super::*;

    async fn setup() -> (SqliteSignedContractRepository, Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db = Arc::new(DbManager::new(temp_dir.path().join("test.db"), 2).expect("manager"));
        db.run_migrations().expect("migrations run");
        (SqliteSignedContractRepository::new(Arc::clone(&db)), db, temp_dir)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reads_only_signed_contracts_within_range() {
        let (repo, db, _dir) = setup().await;
        db.get_connection()
            .expect("connection")
            .execute_batch(
                "INSERT INTO signed_contracts (id, stage_code, total_amount, currency_id, signed_date, closer_id, expert_id)
                 VALUES ('L-1', 'agreement_signed', '50,000', 'USD', '2025-03-01', 'emp-1', ''),
                        ('L-2', 'agreement_signed', 'n/a', 'EUR', '2025-03-31', 'emp-2', 'emp-1'),
                        ('L-3', 'proposal_sent', '900', 'USD', '2025-03-10', 'emp-1', NULL),
                        ('L-4', 'agreement_signed', '700', 'USD', '2025-04-01', 'emp-1', NULL);",
            )
            .expect("seed contracts");

        let contracts =
            repo.fetch_signed_contracts(date(1), date(31)).await.expect("contracts fetched");

        let ids: Vec<_> = contracts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["L-1", "L-2"]);
        assert_eq!(contracts[0].total_amount, dec!(50000));
        assert_eq!(contracts[0].assignee(RoleCode::Closer), Some("emp-1"));
        assert_eq!(contracts[0].assignee(RoleCode::Expert), None);
        assert_eq!(contracts[1].total_amount, dec!(0));
        assert_eq!(contracts[1].currency_id, "EUR");
        assert!(contracts[1].is_attributed(RoleCode::Expert, "emp-1"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn corrupt_dates_surface_as_database_errors() {
        let (repo, db, _dir) = setup().await;
        db.get_connection()
            .expect("connection")
            .execute_batch(
                "INSERT INTO signed_contracts (id, stage_code, total_amount, signed_date)
                 VALUES ('L-9', 'agreement_signed', '10', '2025-03-1x');",
            )
            .expect("seed contract");

        let err = repo
            .fetch_signed_contracts(date(1), date(31))
            .await
            .expect_err("bad date must fail");
        assert!(matches!(err, BonusPoolError::Database(_)));
    }
}
