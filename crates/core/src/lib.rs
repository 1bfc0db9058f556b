//! # Bonuspool Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The two-tier bonus allocation engine
//! - Monthly pool administration
//! - Port interfaces (traits) for contracts, pools and the employee directory
//!
//! ## Architecture Principles
//! - Only depends on `bonuspool-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod bonus;
pub mod pool;
pub mod utils;

// Re-export specific items to avoid ambiguity
pub use bonus::ports::{EmployeeDirectory, SignedContractRepository};
pub use bonus::{BonusCalculator, BonusService, PoolBasis, PoolSplit};
pub use pool::ports::MonthlyPoolRepository;
pub use pool::PoolAdministrationService;
pub use utils::with_timeout;
