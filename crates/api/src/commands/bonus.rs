//! Bonus computation commands

use bonuspool_core::{with_timeout, SignedContractRepository};
use bonuspool_domain::utils::checked;
use bonuspool_domain::{
    format_currency, BonusPeriod, BonusPoolError, ContractBonusPreview, EmployeeBonusResult,
    Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::execute_logged;

/// Every employee's bonus for one month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyBonusReport {
    pub period: BonusPeriod,
    pub manual_pool_amount: Option<Decimal>,
    pub total_bonus: Decimal,
    /// `total_bonus` rounded up and formatted in the base currency.
    pub total_display: String,
    /// True when any employee's figure is a fallback estimate.
    pub has_estimates: bool,
    pub employees: Vec<EmployeeBonusResult>,
}

/// Compute every active employee's bonus for `period`.
pub async fn compute_monthly_bonus_report(
    ctx: &AppContext,
    period: BonusPeriod,
    manual_pool_amount: Option<Decimal>,
) -> Result<MonthlyBonusReport> {
    execute_logged("bonus::compute_monthly_bonus_report", || async {
        let employees = ctx
            .bonus_service
            .compute_all_bonuses(period.first_day()?, period.last_day()?, manual_pool_amount)
            .await?;

        let total_bonus =
            checked::sum("report total", employees.iter().map(|result| result.total_bonus))?;
        Ok(MonthlyBonusReport {
            period,
            manual_pool_amount,
            total_bonus,
            total_display: format_currency(total_bonus, ctx.currency.symbol()),
            has_estimates: employees.iter().any(|result| result.is_estimated),
            employees,
        })
    })
    .await
}

/// Compute one employee's bonus over an explicit date range.
pub async fn compute_employee_bonus(
    ctx: &AppContext,
    employee_id: &str,
    role_code: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
    manual_pool_amount: Option<Decimal>,
) -> Result<EmployeeBonusResult> {
    execute_logged("bonus::compute_employee_bonus", || {
        ctx.bonus_service.compute_employee_bonus(
            employee_id,
            role_code,
            date_from,
            date_to,
            manual_pool_amount,
        )
    })
    .await
}

/// Preview the per-slot payout of one signed contract.
///
/// Contracts are looked up by their signed date; an id that was not signed
/// on `signed_date` is `NotFound`.
pub async fn preview_signed_contract(
    ctx: &AppContext,
    contract_id: &str,
    signed_date: NaiveDate,
) -> Result<ContractBonusPreview> {
    execute_logged("bonus::preview_signed_contract", || async {
        let contract = with_timeout(
            "fetch_signed_contracts",
            ctx.config.bonus.fetch_timeout(),
            ctx.contracts.fetch_signed_contracts(signed_date, signed_date),
        )
        .await?
        .into_iter()
        .find(|contract| contract.id == contract_id)
        .ok_or_else(|| {
            BonusPoolError::NotFound(format!("signed contract {contract_id} on {signed_date}"))
        })?;

        ctx.bonus_service.preview_contract_bonus(&contract).await
    })
    .await
}
