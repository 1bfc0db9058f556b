//! Database module
//!
//! SQLite persistence for signed contracts, monthly pools and the employee
//! directory, pooled through r2d2.

pub mod contract_repository;
pub mod employee_repository;
pub mod manager;
pub mod pool_repository;

pub use contract_repository::SqliteSignedContractRepository;
pub use employee_repository::SqliteEmployeeDirectory;
pub use manager::{DbManager, SqliteConnection};
pub use pool_repository::SqliteMonthlyPoolRepository;
