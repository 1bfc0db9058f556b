//! Pool administration service

use std::sync::Arc;
use std::time::Duration;

use bonuspool_domain::constants::DEFAULT_FETCH_TIMEOUT_SECS;
use bonuspool_domain::utils::checked;
use bonuspool_domain::{BonusPeriod, BonusPoolError, CurrencyTable, MonthlyPool, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::MonthlyPoolRepository;
use crate::bonus::ports::SignedContractRepository;
use crate::utils::with_timeout;

/// Administrator operations on monthly bonus pools.
pub struct PoolAdministrationService {
    pools: Arc<dyn MonthlyPoolRepository>,
    contracts: Arc<dyn SignedContractRepository>,
    currency: Arc<CurrencyTable>,
    fetch_timeout: Duration,
}

impl PoolAdministrationService {
    /// Create a new pool administration service
    pub fn new(
        pools: Arc<dyn MonthlyPoolRepository>,
        contracts: Arc<dyn SignedContractRepository>,
        currency: Arc<CurrencyTable>,
    ) -> Self {
        Self {
            pools,
            contracts,
            currency,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }

    /// Bound each store call by `timeout`.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Pool configured for a month, if any.
    pub async fn get_monthly_pool(&self, year: i32, month: u32) -> Result<Option<MonthlyPool>> {
        let period = BonusPeriod::new(year, month)?;
        with_timeout("fetch_pool", self.fetch_timeout, self.pools.fetch_pool(period)).await
    }

    /// Create or replace the pool for a month.
    ///
    /// Without an explicit `total_revenue` the month's signed contracts are
    /// summed in base currency.
    pub async fn upsert_monthly_pool(
        &self,
        year: i32,
        month: u32,
        total_bonus_pool_amount: Decimal,
        total_revenue: Option<Decimal>,
    ) -> Result<MonthlyPool> {
        let period = BonusPeriod::new(year, month)?;
        ensure_non_negative("total_bonus_pool_amount", total_bonus_pool_amount)?;
        if let Some(revenue) = total_revenue {
            ensure_non_negative("total_revenue", revenue)?;
        }

        let total_revenue = match total_revenue {
            Some(revenue) => revenue,
            None => self.revenue_for_period(period).await?,
        };

        let pool =
            MonthlyPool::new(period, total_bonus_pool_amount, total_revenue, Utc::now().timestamp())?;
        if !pool.is_effective() {
            warn!(%period, %total_revenue, "pool saved without revenue, bonuses will be estimates");
        }

        let stored =
            with_timeout("persist_pool", self.fetch_timeout, self.pools.persist_pool(pool)).await?;
        info!(
            %period,
            pool_id = %stored.id,
            amount = %stored.total_bonus_pool_amount,
            revenue = %stored.total_revenue,
            pool_percentage = %stored.pool_percentage,
            "monthly pool saved"
        );
        Ok(stored)
    }

    /// Delete a pool by id.
    pub async fn delete_monthly_pool(&self, id: Uuid) -> Result<()> {
        with_timeout("delete_pool", self.fetch_timeout, self.pools.delete_pool(id)).await?;
        info!(pool_id = %id, "monthly pool deleted");
        Ok(())
    }

    /// Pool history, newest period first.
    pub async fn list_monthly_pools(&self) -> Result<Vec<MonthlyPool>> {
        with_timeout("list_pools", self.fetch_timeout, self.pools.list_pools()).await
    }

    /// Base-currency revenue of contracts signed during `period`.
    pub async fn revenue_for_period(&self, period: BonusPeriod) -> Result<Decimal> {
        let contracts = with_timeout(
            "fetch_signed_contracts",
            self.fetch_timeout,
            self.contracts.fetch_signed_contracts(period.first_day()?, period.last_day()?),
        )
        .await?;

        contracts.iter().try_fold(Decimal::ZERO, |total, contract| {
            let amount =
                self.currency.to_base_currency(contract.total_amount, &contract.currency_id)?;
            total.checked_add(amount).ok_or_else(|| checked::overflow("period revenue"))
        })
    }
}

fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(BonusPoolError::InvalidInput(format!("{field} must not be negative, got {value}")));
    }
    Ok(())
}
