//! # Bonuspool Domain
//!
//! Business domain types and models for the bonus pool engine.
//!
//! This crate contains:
//! - Domain data types (signed contracts, monthly pools, bonus results)
//! - The static role taxonomy and currency table
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other bonuspool crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod macros;
pub mod taxonomy;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use currency::CurrencyTable;
pub use errors::*;
pub use taxonomy::{RoleCategory, Taxonomy, TaxonomySummary};
pub use types::*;
pub use utils::amount::parse_amount;
pub use utils::format::format_currency;
