//! Shared fixtures for infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bonuspool_infra::database::DbManager;
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with migrations applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("bonuspool-test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema migrations should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed a March 2025 sales month: three signed contracts, one unsigned lead
/// and a small staff.
pub fn seed_march_2025(db: &TestDatabase) {
    db.execute_batch(
        "INSERT INTO employees (id, name, role_code, is_active) VALUES
            ('emp-closer', 'Avi', 'closer', 1),
            ('emp-handler', 'Bella', 'handler', 1),
            ('emp-mkt-1', 'Chen', 'marketing', 1),
            ('emp-mkt-2', 'Dina', 'marketing', 1),
            ('emp-gone', 'Eli', 'closer', 0);

         INSERT INTO signed_contracts
            (id, stage_code, total_amount, currency_id, signed_date, closer_id, expert_id, handler_id)
         VALUES
            ('L-1', 'agreement_signed', '50,000', 'USD', '2025-03-04', 'emp-closer', NULL, 'emp-handler'),
            ('L-2', 'agreement_signed', '25000', 'USD', '2025-03-18', 'emp-closer', 'emp-handler', NULL),
            ('L-3', 'agreement_signed', '', 'USD', '2025-03-20', 'emp-closer', NULL, NULL),
            ('L-4', 'negotiation', '99000', 'USD', '2025-03-21', 'emp-closer', NULL, NULL);",
    );
}
