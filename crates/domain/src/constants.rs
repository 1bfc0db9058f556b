//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Fallback estimate used when no monthly pool is configured
pub const FALLBACK_POOL_MULTIPLIER: u32 = 10;

// Accessor and batch defaults
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

// Monthly pool cache defaults
pub const DEFAULT_POOL_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_POOL_CACHE_MAX_CAPACITY: u64 = 240;

// Database defaults
pub const DEFAULT_DB_PATH: &str = "bonuspool.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

// Currency defaults
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Pipeline stage code of a contract whose agreement has been signed.
pub const SIGNED_STAGE_CODE: &str = "agreement_signed";
