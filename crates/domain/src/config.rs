//! Configuration management

use std::collections::BTreeMap;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_CURRENCY, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE,
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENCY, DEFAULT_POOL_CACHE_MAX_CAPACITY,
    DEFAULT_POOL_CACHE_TTL_SECS,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub bonus: BonusConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: DEFAULT_DB_PATH.to_string(), pool_size: DEFAULT_DB_POOL_SIZE }
    }
}

/// Bonus engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Upper bound for each contract, pool or directory fetch.
    pub fetch_timeout_seconds: u64,
    /// Employees computed concurrently in a batch run.
    pub max_concurrency: usize,
    pub pool_cache_ttl_seconds: u64,
    pub pool_cache_max_capacity: u64,
}

impl BonusConfig {
    /// Fetch timeout as a `Duration`, never shorter than one second.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds.max(1))
    }

    /// Pool cache time-to-live as a `Duration`.
    pub fn pool_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.pool_cache_ttl_seconds)
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            pool_cache_ttl_seconds: DEFAULT_POOL_CACHE_TTL_SECS,
            pool_cache_max_capacity: DEFAULT_POOL_CACHE_MAX_CAPACITY,
        }
    }
}

/// Base currency and the static conversion table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub base_currency: String,
    pub symbol: String,
    /// Base-currency units per one unit of each currency.
    pub rates: BTreeMap<String, Decimal>,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        let rates = [
            (DEFAULT_BASE_CURRENCY, Decimal::ONE),
            ("EUR", Decimal::new(108, 2)),
            ("GBP", Decimal::new(127, 2)),
            ("ILS", Decimal::new(27, 2)),
        ]
        .into_iter()
        .map(|(currency, rate)| (currency.to_string(), rate))
        .collect();

        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            rates,
        }
    }
}
