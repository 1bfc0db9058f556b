#![allow(dead_code)]

use bonuspool_domain::{Config, DatabaseConfig};
use bonuspool_lib::context::AppContext;
use tempfile::TempDir;

/// Application context over a fresh temporary database.
pub struct TestApp {
    pub ctx: AppContext,
    /// Keep temporary directory alive for the lifetime of the context.
    _temp_dir: TempDir,
}

/// Create a context with migrations applied and no data.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");
    let db_path = temp_dir.path().join("bonuspool.db");

    let config = Config {
        database: DatabaseConfig { path: db_path.to_string_lossy().to_string(), pool_size: 4 },
        ..Config::default()
    };

    let ctx = AppContext::new_with_config(config).await.expect("context should initialise");
    TestApp { ctx, _temp_dir: temp_dir }
}

impl TestApp {
    /// Execute a batch of SQL statements against the context's database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self.ctx.db.get_connection().expect("connection should be available");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    /// One closer and one partner, with two contracts signed in April 2025.
    pub fn seed_april_2025(&self) {
        self.execute_batch(
            "INSERT INTO employees (id, name, role_code, is_active) VALUES
                ('emp-closer', 'Noa', 'closer', 1),
                ('emp-partner', 'Omer', 'partners', 1);

             INSERT INTO signed_contracts
                (id, stage_code, total_amount, currency_id, signed_date, closer_id, manager_id)
             VALUES
                ('L-10', 'agreement_signed', '40000', 'USD', '2025-04-02', 'emp-closer', NULL),
                ('L-11', 'agreement_signed', '10000', 'EUR', '2025-04-15', 'emp-closer', 'emp-partner');",
        );
    }
}
