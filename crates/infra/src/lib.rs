//! # Bonuspool Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories for signed contracts, monthly pools and employees
//! - A moka cache in front of monthly pool lookups
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `bonuspool-core`
//! - Contains all "impure" code (database and filesystem I/O)

pub mod cache;
pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use cache::{CachedMonthlyPoolRepository, PoolCacheConfig};
pub use database::{
    DbManager, SqliteEmployeeDirectory, SqliteMonthlyPoolRepository,
    SqliteSignedContractRepository,
};
pub use errors::InfraError;
