//! Monthly pool administration commands

use bonuspool_domain::{BonusPeriod, MonthlyPool, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::context::AppContext;
use crate::utils::execute_logged;

/// Pool configured for `period`, if any.
pub async fn get_monthly_pool(ctx: &AppContext, period: BonusPeriod) -> Result<Option<MonthlyPool>> {
    execute_logged("pools::get_monthly_pool", || {
        ctx.pool_admin.get_monthly_pool(period.year, period.month)
    })
    .await
}

/// Create or replace the pool for `period`.
///
/// Revenue defaults to the month's signed contract total.
pub async fn save_monthly_pool(
    ctx: &AppContext,
    period: BonusPeriod,
    total_bonus_pool_amount: Decimal,
    total_revenue: Option<Decimal>,
) -> Result<MonthlyPool> {
    execute_logged("pools::save_monthly_pool", || {
        ctx.pool_admin.upsert_monthly_pool(
            period.year,
            period.month,
            total_bonus_pool_amount,
            total_revenue,
        )
    })
    .await
}

/// Delete a pool by id.
pub async fn delete_monthly_pool(ctx: &AppContext, id: Uuid) -> Result<()> {
    execute_logged("pools::delete_monthly_pool", || ctx.pool_admin.delete_monthly_pool(id)).await
}

/// Pool history, newest first.
pub async fn list_monthly_pools(ctx: &AppContext) -> Result<Vec<MonthlyPool>> {
    execute_logged("pools::list_monthly_pools", || ctx.pool_admin.list_monthly_pools()).await
}
