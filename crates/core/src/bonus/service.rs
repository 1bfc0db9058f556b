//! Bonus service - fetches inputs and runs the allocation engine

use std::sync::Arc;
use std::time::Duration;

use bonuspool_domain::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENCY};
use bonuspool_domain::utils::checked;
use bonuspool_domain::{
    BonusPeriod, BonusPoolError, ContractBonusPreview, CurrencyTable, Employee,
    EmployeeBonusResult, MonthlyPool, Result, RoleCategory, RoleCode, SignedContract, Taxonomy,
};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt, TryStreamExt};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::calculator::{BonusCalculator, PoolSplit};
use super::ports::{EmployeeDirectory, SignedContractRepository};
use crate::pool::ports::MonthlyPoolRepository;
use crate::utils::with_timeout;

/// Computes employee bonuses from signed contracts and monthly pools.
///
/// Every port call is bounded by the fetch timeout. Accessor failures are
/// returned as errors, never as zero bonuses.
pub struct BonusService {
    contracts: Arc<dyn SignedContractRepository>,
    pools: Arc<dyn MonthlyPoolRepository>,
    directory: Arc<dyn EmployeeDirectory>,
    calculator: BonusCalculator,
    fetch_timeout: Duration,
    max_concurrency: usize,
}

impl BonusService {
    /// Create a new bonus service
    pub fn new(
        contracts: Arc<dyn SignedContractRepository>,
        pools: Arc<dyn MonthlyPoolRepository>,
        directory: Arc<dyn EmployeeDirectory>,
        taxonomy: Arc<Taxonomy>,
        currency: Arc<CurrencyTable>,
    ) -> Self {
        Self {
            contracts,
            pools,
            directory,
            calculator: BonusCalculator::new(taxonomy, currency),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Bound each port call by `timeout`.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Number of employees computed at once by [`Self::compute_all_bonuses`].
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Bonus for one employee over `[date_from, date_to]`.
    ///
    /// The pool is looked up for the month of `date_from` only. Unknown role
    /// codes yield an empty result without touching any store.
    pub async fn compute_employee_bonus(
        &self,
        employee_id: &str,
        role_code: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
        manual_pool_amount: Option<Decimal>,
    ) -> Result<EmployeeBonusResult> {
        validate_request(date_from, date_to, manual_pool_amount)?;
        let period = BonusPeriod::containing(date_from);

        let result = match RoleCategory::classify(role_code) {
            RoleCategory::Unknown => {
                debug!(employee_id, role_code, "no bonus calculation for role");
                EmployeeBonusResult::empty(employee_id, period)
            }
            category @ (RoleCategory::Sales(_) | RoleCategory::Handler) => {
                let pool = self.fetch_pool(period).await?;
                let contracts = self.fetch_contracts(date_from, date_to).await?;
                self.calculator.contract_bonus(
                    employee_id,
                    category,
                    period,
                    &contracts,
                    pool.as_ref(),
                )?
            }
            RoleCategory::Pool(role) => {
                let amount = match manual_pool_amount {
                    Some(amount) => Some(amount),
                    None => configured_pool_amount(self.fetch_pool(period).await?.as_ref()),
                };
                match amount {
                    Some(amount) => {
                        let head_count = self.count_holders(role).await?;
                        self.calculator.pool_split_bonus(
                            employee_id,
                            role,
                            period,
                            PoolSplit { amount, head_count },
                        )?
                    }
                    None => {
                        debug!(employee_id, %period, role = %role, "no pool amount for pool-based role");
                        EmployeeBonusResult::empty(employee_id, period)
                    }
                }
            }
        };

        debug!(
            employee_id,
            %period,
            total_bonus = %result.total_bonus,
            roles = result.role_bonuses.len(),
            is_estimated = result.is_estimated,
            "employee bonus computed"
        );
        Ok(result)
    }

    /// Bonuses for every active employee, in directory order.
    ///
    /// The directory, the pool and the contracts are each read once; the
    /// per-employee arithmetic runs on the blocking pool with bounded
    /// concurrency.
    pub async fn compute_all_bonuses(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
        manual_pool_amount: Option<Decimal>,
    ) -> Result<Vec<EmployeeBonusResult>> {
        validate_request(date_from, date_to, manual_pool_amount)?;
        let period = BonusPeriod::containing(date_from);

        let (employees, pool, contracts) = futures::try_join!(
            with_timeout(
                "list_active_employees",
                self.fetch_timeout,
                self.directory.list_active_employees()
            ),
            self.fetch_pool(period),
            self.fetch_contracts(date_from, date_to),
        )?;

        let inputs = Arc::new(BatchInputs {
            period,
            pool_amount: manual_pool_amount.or_else(|| configured_pool_amount(pool.as_ref())),
            pool,
            contracts,
            head_counts: head_counts(&employees),
        });

        let results: Vec<EmployeeBonusResult> = stream::iter(employees)
            .map(|employee| {
                let calculator = self.calculator.clone();
                let inputs = Arc::clone(&inputs);
                async move {
                    tokio::task::spawn_blocking(move || inputs.compute(&calculator, &employee))
                        .await
                        .map_err(|e| {
                            BonusPoolError::Internal(format!("bonus computation task failed: {e}"))
                        })
                        .and_then(|result| result)
                }
            })
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        let total =
            checked::sum("batch bonus total", results.iter().map(|result| result.total_bonus))?;
        info!(
            %period,
            employees = results.len(),
            contracts = inputs.contracts.len(),
            pool_configured = inputs.pool.is_some(),
            total_bonus = %total,
            "bonus batch computed"
        );
        Ok(results)
    }

    /// Per-slot bonus preview for a single contract, against the pool of
    /// the month it was signed in.
    pub async fn preview_contract_bonus(
        &self,
        contract: &SignedContract,
    ) -> Result<ContractBonusPreview> {
        let pool = self.fetch_pool(BonusPeriod::containing(contract.signed_date)).await?;
        self.calculator.preview_contract(contract, pool.as_ref())
    }

    async fn fetch_pool(&self, period: BonusPeriod) -> Result<Option<MonthlyPool>> {
        with_timeout("fetch_pool", self.fetch_timeout, self.pools.fetch_pool(period)).await
    }

    async fn fetch_contracts(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<SignedContract>> {
        with_timeout(
            "fetch_signed_contracts",
            self.fetch_timeout,
            self.contracts.fetch_signed_contracts(date_from, date_to),
        )
        .await
    }

    async fn count_holders(&self, role: RoleCode) -> Result<usize> {
        with_timeout(
            "count_active_with_role",
            self.fetch_timeout,
            self.directory.count_active_with_role(role),
        )
        .await
    }
}

/// Inputs shared by every employee of one batch run.
struct BatchInputs {
    period: BonusPeriod,
    pool: Option<MonthlyPool>,
    pool_amount: Option<Decimal>,
    contracts: Vec<SignedContract>,
    head_counts: Vec<(RoleCode, usize)>,
}

impl BatchInputs {
    fn compute(
        &self,
        calculator: &BonusCalculator,
        employee: &Employee,
    ) -> Result<EmployeeBonusResult> {
        match RoleCategory::classify(&employee.role_code) {
            RoleCategory::Unknown => {
                Ok(EmployeeBonusResult::empty(employee.id.as_str(), self.period))
            }
            category @ (RoleCategory::Sales(_) | RoleCategory::Handler) => calculator
                .contract_bonus(
                    &employee.id,
                    category,
                    self.period,
                    &self.contracts,
                    self.pool.as_ref(),
                ),
            RoleCategory::Pool(role) => match self.pool_amount {
                Some(amount) => {
                    let head_count = self
                        .head_counts
                        .iter()
                        .find_map(|(code, count)| (*code == role).then_some(*count))
                        .unwrap_or(0);
                    calculator.pool_split_bonus(
                        &employee.id,
                        role,
                        self.period,
                        PoolSplit { amount, head_count },
                    )
                }
                None => Ok(EmployeeBonusResult::empty(employee.id.as_str(), self.period)),
            },
        }
    }
}

fn validate_request(
    date_from: NaiveDate,
    date_to: NaiveDate,
    manual_pool_amount: Option<Decimal>,
) -> Result<()> {
    if date_from > date_to {
        return Err(BonusPoolError::InvalidInput(format!(
            "date range is reversed: {date_from} > {date_to}"
        )));
    }
    if let Some(amount) = manual_pool_amount.filter(|amount| *amount < Decimal::ZERO) {
        return Err(BonusPoolError::InvalidInput(format!(
            "manual pool amount must not be negative, got {amount}"
        )));
    }
    Ok(())
}

/// Pool amount a pool-based role splits when no manual amount is given.
fn configured_pool_amount(pool: Option<&MonthlyPool>) -> Option<Decimal> {
    pool.map(|pool| pool.total_bonus_pool_amount).filter(|amount| *amount > Decimal::ZERO)
}

/// Active holders of each pool-based role.
fn head_counts(employees: &[Employee]) -> Vec<(RoleCode, usize)> {
    [RoleCode::Marketing, RoleCode::Collection, RoleCode::Partners]
        .into_iter()
        .map(|role| {
            let count = employees
                .iter()
                .filter(|employee| {
                    employee.is_active
                        && RoleCategory::classify(&employee.role_code) == RoleCategory::Pool(role)
                })
                .count();
            (role, count)
        })
        .collect()
}
