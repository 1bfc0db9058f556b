//! Port interface for monthly pool storage

use async_trait::async_trait;
use bonuspool_domain::{BonusPeriod, MonthlyPool, Result};
use uuid::Uuid;

/// Storage for monthly bonus pools, unique per (year, month).
#[async_trait]
pub trait MonthlyPoolRepository: Send + Sync {
    /// Pool configured for `period`; `Ok(None)` when there is none.
    ///
    /// Storage faults are errors and must not be reported as `None`.
    async fn fetch_pool(&self, period: BonusPeriod) -> Result<Option<MonthlyPool>>;

    /// Insert or update the pool for its (year, month) and return the stored
    /// row. An existing row keeps its id.
    async fn persist_pool(&self, pool: MonthlyPool) -> Result<MonthlyPool>;

    /// Delete a pool by id. Deleting a missing id is not an error.
    async fn delete_pool(&self, id: Uuid) -> Result<()>;

    /// All pools, most recent period first.
    async fn list_pools(&self) -> Result<Vec<MonthlyPool>>;
}
