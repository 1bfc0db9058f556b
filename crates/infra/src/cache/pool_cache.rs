//! Monthly pool caching with moka
//!
//! Pool lookups happen once per employee and once per contract preview, while
//! pools change only when an administrator edits them. The cache wraps any
//! `MonthlyPoolRepository` and is injected in its place.
//!
//! # Architecture
//!
//! - **Entries**: keyed by period; `None` records a month without a pool
//! - **Error Handling**: only `Ok` results are cached, never transient errors
//! - **Invalidation**: writes through this wrapper evict the affected period
//!   and bump a write generation; a read that overlapped a write does not
//!   repopulate the cache with what it fetched
//! - **TTL**: bounds staleness for writes made by other processes

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bonuspool_core::MonthlyPoolRepository;
use bonuspool_domain::constants::{DEFAULT_POOL_CACHE_MAX_CAPACITY, DEFAULT_POOL_CACHE_TTL_SECS};
use bonuspool_domain::{BonusConfig, BonusPeriod, MonthlyPool, Result};
use moka::sync::Cache;
use parking_lot::Mutex;
use uuid::Uuid;

/// Pool cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolCacheConfig {
    /// Time-to-live for cache entries
    pub ttl: Duration,

    /// Maximum number of cached periods
    pub max_capacity: u64,
}

impl Default for PoolCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_POOL_CACHE_TTL_SECS),
            max_capacity: DEFAULT_POOL_CACHE_MAX_CAPACITY,
        }
    }
}

impl PoolCacheConfig {
    /// Cache settings from the bonus engine configuration.
    pub fn from_bonus_config(config: &BonusConfig) -> Self {
        Self { ttl: config.pool_cache_ttl(), max_capacity: config.pool_cache_max_capacity }
    }

    /// Create config with custom TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, ..Self::default() }
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(
            ttl_seconds = self.ttl.as_secs(),
            max_capacity = self.max_capacity,
            "pool cache configuration loaded"
        );
    }
}

/// Cache result for get operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult {
    /// Cache hit with a configured pool
    Hit(MonthlyPool),

    /// Cache miss - not in cache
    Miss,

    /// Negative cache hit - the month has no pool
    NotFound,
}

/// Caching decorator for a [`MonthlyPoolRepository`].
pub struct CachedMonthlyPoolRepository<R: ?Sized = dyn MonthlyPoolRepository> {
    inner: Arc<R>,
    cache: Cache<BonusPeriod, Option<MonthlyPool>>,
    /// Bumped by every write and clear. Held while inserting, so a fill
    /// and an eviction never interleave.
    generation: Mutex<u64>,
}

impl<R: MonthlyPoolRepository + ?Sized> CachedMonthlyPoolRepository<R> {
    /// Wrap `inner` with a cache built from `config`.
    pub fn new(inner: Arc<R>, config: PoolCacheConfig) -> Self {
        config.log_config();
        let cache = Cache::builder().time_to_live(config.ttl).max_capacity(config.max_capacity).build();
        Self { inner, cache, generation: Mutex::new(0) }
    }

    /// Look up a period without falling back to the store.
    pub fn get(&self, period: BonusPeriod) -> CacheResult {
        match self.cache.get(&period) {
            Some(Some(pool)) => {
                tracing::debug!(%period, "pool cache hit");
                CacheResult::Hit(pool)
            }
            Some(None) => {
                tracing::debug!(%period, "pool negative cache hit");
                CacheResult::NotFound
            }
            None => {
                tracing::debug!(%period, "pool cache miss");
                CacheResult::Miss
            }
        }
    }

    /// Evict one period.
    pub fn invalidate(&self, period: BonusPeriod) {
        let mut generation = self.generation.lock();
        *generation += 1;
        self.cache.invalidate(&period);
    }

    /// Evict every period.
    pub fn clear(&self) {
        let mut generation = self.generation.lock();
        *generation += 1;
        self.cache.invalidate_all();
    }

    /// Cache `pool` unless a write happened since `read_generation`.
    fn fill(&self, period: BonusPeriod, pool: Option<MonthlyPool>, read_generation: u64) {
        let generation = self.generation.lock();
        if *generation == read_generation {
            self.cache.insert(period, pool);
        } else {
            tracing::debug!(%period, "pool changed during read, result not cached");
        }
    }
}

#[async_trait]
impl<R: MonthlyPoolRepository + ?Sized> MonthlyPoolRepository for CachedMonthlyPoolRepository<R> {
    async fn fetch_pool(&self, period: BonusPeriod) -> Result<Option<MonthlyPool>> {
        match self.get(period) {
            CacheResult::Hit(pool) => return Ok(Some(pool)),
            CacheResult::NotFound => return Ok(None),
            CacheResult::Miss => {}
        }

        let read_generation = *self.generation.lock();
        let pool = self.inner.fetch_pool(period).await?;
        self.fill(period, pool.clone(), read_generation);
        Ok(pool)
    }

    async fn persist_pool(&self, pool: MonthlyPool) -> Result<MonthlyPool> {
        let period = pool.period();
        let result = self.inner.persist_pool(pool).await;
        self.invalidate(period);
        result
    }

    async fn delete_pool(&self, id: Uuid) -> Result<()> {
        let result = self.inner.delete_pool(id).await;
        let cached_period = self
            .cache
            .iter()
            .find_map(|(period, pool)| pool.filter(|pool| pool.id == id).map(|_| *period));
        match cached_period {
            Some(period) => self.invalidate(period),
            // Not cached, but a read in flight may be about to cache it.
            None => *self.generation.lock() += 1,
        }
        result
    }

    async fn list_pools(&self) -> Result<Vec<MonthlyPool>> {
        self.inner.list_pools().await
    }
}
