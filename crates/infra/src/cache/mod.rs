//! In-memory caches in front of repositories

pub mod pool_cache;

pub use pool_cache::{CacheResult, CachedMonthlyPoolRepository, PoolCacheConfig};
