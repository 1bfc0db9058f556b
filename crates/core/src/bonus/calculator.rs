//! Two-tier bonus allocation
//!
//! Pure arithmetic over already-fetched data. A role's bonus is drawn from
//! its group's share of the monthly pool, then from the role's share inside
//! the group:
//!
//! ```text
//! group_allocation = pool_amount * group_share / 100
//! proportion       = base_amount / total_revenue
//! bonus            = group_allocation * role_share * proportion / 100
//! ```
//!
//! The proportion is taken against the whole period's revenue, not against
//! the revenue of the role. Without an effective pool the calculation falls
//! back to a placeholder estimate flagged on the result.
//!
//! Every step is overflow-checked; out-of-range figures surface as
//! `InvalidInput` instead of panicking a worker.

use std::sync::Arc;

use bonuspool_domain::constants::FALLBACK_POOL_MULTIPLIER;
use bonuspool_domain::utils::checked;
use bonuspool_domain::{
    BonusPeriod, ContractBonusLine, ContractBonusPreview, CurrencyTable, EmployeeBonusResult,
    GroupDefinition, GroupId, MonthlyPool, RoleBonusResult, RoleCategory, RoleCode,
    RoleDefinition, Result, SignedContract, Taxonomy,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Pool figures an allocation is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolBasis<'a> {
    /// A configured pool with positive revenue and percentage.
    Configured(&'a MonthlyPool),
    /// No usable pool; figures are placeholders.
    Estimated,
}

impl<'a> PoolBasis<'a> {
    /// Choose the basis for an optional pool. Pools with zero revenue or a
    /// non-positive percentage count as not configured.
    pub fn from_pool(pool: Option<&'a MonthlyPool>) -> Self {
        match pool {
            Some(pool) if pool.is_effective() => Self::Configured(pool),
            _ => Self::Estimated,
        }
    }

    /// Whether results on this basis are placeholders.
    pub fn is_estimated(&self) -> bool {
        matches!(self, Self::Estimated)
    }
}

/// Percentage and amount for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub final_percentage: Decimal,
    pub bonus_amount: Decimal,
    pub estimated_pool_amount: Option<Decimal>,
}

/// Allocate a contract-attributed role bonus.
///
/// # Errors
/// `InvalidInput` when any intermediate figure overflows.
pub fn allocate(
    group: &GroupDefinition,
    role: &RoleDefinition,
    base_amount: Decimal,
    basis: PoolBasis<'_>,
) -> Result<Allocation> {
    let group_share = group.pool_share_percentage;
    let role_share = role.in_group_percentage;

    match basis {
        PoolBasis::Configured(pool) => {
            let group_allocation = checked::div(
                "group allocation",
                checked::mul("group allocation", pool.total_bonus_pool_amount, group_share)?,
                Decimal::ONE_HUNDRED,
            )?;
            let employee_proportion =
                checked::div("employee proportion", base_amount, pool.total_revenue)?;
            let weighted = checked::mul(
                "role bonus",
                checked::mul("role bonus", group_allocation, role_share)?,
                employee_proportion,
            )?;
            Ok(Allocation {
                final_percentage: final_percentage(group_share, role_share)?,
                bonus_amount: checked::div("role bonus", weighted, Decimal::ONE_HUNDRED)?,
                estimated_pool_amount: None,
            })
        }
        PoolBasis::Estimated => {
            let weighted = checked::mul(
                "estimated bonus",
                checked::mul("estimated bonus", base_amount, group_share)?,
                role_share,
            )?;
            Ok(Allocation {
                // Group tier is skipped: the unscaled in-group share is reported.
                final_percentage: role_share,
                bonus_amount: checked::div("estimated bonus", weighted, Decimal::ONE_HUNDRED)?,
                estimated_pool_amount: Some(checked::mul(
                    "estimated pool",
                    base_amount,
                    Decimal::from(FALLBACK_POOL_MULTIPLIER),
                )?),
            })
        }
    }
}

/// Allocate one holder's equal share of a pool-based role.
///
/// `head_count` below one is treated as a single holder.
///
/// # Errors
/// `InvalidInput` when any intermediate figure overflows.
pub fn allocate_pool_split(
    group: &GroupDefinition,
    role: &RoleDefinition,
    pool_amount: Decimal,
    head_count: usize,
) -> Result<Allocation> {
    let group_share = group.pool_share_percentage;
    let role_share = role.in_group_percentage;
    let holders = Decimal::from(head_count.max(1));

    let weighted = checked::mul(
        "pool split",
        checked::mul("pool split", pool_amount, group_share)?,
        role_share,
    )?;
    let per_role = checked::div("pool split", weighted, Decimal::from(10_000))?;

    Ok(Allocation {
        final_percentage: final_percentage(group_share, role_share)?,
        bonus_amount: checked::div("pool split", per_role, holders)?,
        estimated_pool_amount: None,
    })
}

fn final_percentage(group_share: Decimal, role_share: Decimal) -> Result<Decimal> {
    checked::div(
        "final percentage",
        checked::mul("final percentage", group_share, role_share)?,
        Decimal::ONE_HUNDRED,
    )
}

/// Contracts an employee holds in one slot, with their base-currency total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAttribution {
    pub role_code: RoleCode,
    pub group_id: GroupId,
    pub base_amount: Decimal,
    pub contract_count: usize,
}

/// Amount to split evenly across the holders of a pool-based role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSplit {
    pub amount: Decimal,
    pub head_count: usize,
}

/// Bonus arithmetic bound to a taxonomy and currency table.
#[derive(Debug, Clone)]
pub struct BonusCalculator {
    taxonomy: Arc<Taxonomy>,
    currency: Arc<CurrencyTable>,
}

impl BonusCalculator {
    /// Create a calculator.
    pub fn new(taxonomy: Arc<Taxonomy>, currency: Arc<CurrencyTable>) -> Self {
        Self { taxonomy, currency }
    }

    /// Taxonomy used for lookups.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Contract total in base currency.
    pub fn base_amount(&self, contract: &SignedContract) -> Result<Decimal> {
        if self.currency.rate(&contract.currency_id).is_none() {
            warn!(
                contract_id = %contract.id,
                currency_id = %contract.currency_id,
                "unknown currency, amount used unconverted"
            );
        }
        self.currency.to_base_currency(contract.total_amount, &contract.currency_id)
    }

    /// Group the employee's contracts by the slot they hold.
    ///
    /// A contract contributes at most once per slot; holding several slots
    /// on one contract counts it once in each.
    pub fn attribute_contracts(
        &self,
        employee_id: &str,
        category: RoleCategory,
        contracts: &[SignedContract],
    ) -> Result<Vec<RoleAttribution>> {
        let mut attributions = Vec::new();
        for &(slot, group_id) in category.attribution_slots() {
            let mut base_amount = Decimal::ZERO;
            let mut contract_count = 0_usize;
            let held = contracts.iter().filter(|contract| contract.is_attributed(slot, employee_id));
            for contract in held {
                base_amount = base_amount
                    .checked_add(self.base_amount(contract)?)
                    .ok_or_else(|| checked::overflow("attributed revenue"))?;
                contract_count += 1;
            }

            if contract_count > 0 {
                attributions.push(RoleAttribution {
                    role_code: slot,
                    group_id,
                    base_amount,
                    contract_count,
                });
            }
        }
        Ok(attributions)
    }

    /// Bonus for a contract-attributed employee.
    pub fn contract_bonus(
        &self,
        employee_id: &str,
        category: RoleCategory,
        period: BonusPeriod,
        contracts: &[SignedContract],
        pool: Option<&MonthlyPool>,
    ) -> Result<EmployeeBonusResult> {
        let basis = PoolBasis::from_pool(pool);

        let mut role_bonuses = Vec::new();
        for attribution in self.attribute_contracts(employee_id, category, contracts)? {
            if let Some(bonus) = self.role_bonus(&attribution, basis)? {
                role_bonuses.push(bonus);
            }
        }

        let is_estimated = basis.is_estimated() && !role_bonuses.is_empty();
        if is_estimated {
            warn!(
                employee_id,
                %period,
                "no monthly pool configured, bonus figures are estimates"
            );
        }

        EmployeeBonusResult::from_roles(employee_id, period, role_bonuses, is_estimated)
    }

    /// Bonus for a holder of a pool-based role.
    pub fn pool_split_bonus(
        &self,
        employee_id: &str,
        role_code: RoleCode,
        period: BonusPeriod,
        split: PoolSplit,
    ) -> Result<EmployeeBonusResult> {
        let Some((group, role)) = self.definitions(role_code) else {
            return Ok(EmployeeBonusResult::empty(employee_id, period));
        };

        let allocation = allocate_pool_split(group, &role, split.amount, split.head_count)?;
        debug!(
            employee_id,
            role = %role_code,
            head_count = split.head_count,
            bonus = %allocation.bonus_amount,
            "pool-based role allocated"
        );

        let result = RoleBonusResult {
            role_code,
            group_id: group.group_id,
            final_percentage: allocation.final_percentage,
            base_amount: split.amount,
            bonus_amount: allocation.bonus_amount,
            contract_count: 0,
            is_pool_based: role.is_pool_based,
            estimated_pool_amount: None,
        };

        EmployeeBonusResult::from_roles(employee_id, period, vec![result], false)
    }

    /// What each attributed employee would earn from `contract` alone.
    ///
    /// Slots are resolved through role-only lookups, so an expert is paid
    /// from the sales group.
    pub fn preview_contract(
        &self,
        contract: &SignedContract,
        pool: Option<&MonthlyPool>,
    ) -> Result<ContractBonusPreview> {
        let basis = PoolBasis::from_pool(pool);
        let base_amount = self.base_amount(contract)?;

        let mut lines = Vec::new();
        for &slot in &RoleCode::CONTRACT_SLOTS {
            let Some(employee_id) = contract.assignee(slot) else {
                continue;
            };
            let Some((group, role)) = self.definitions(slot) else {
                continue;
            };
            let allocation = allocate(group, &role, base_amount, basis)?;
            lines.push(ContractBonusLine {
                role_code: slot,
                employee_id: employee_id.to_string(),
                group_id: group.group_id,
                final_percentage: allocation.final_percentage,
                bonus_amount: allocation.bonus_amount,
            });
        }

        Ok(ContractBonusPreview {
            contract_id: contract.id.clone(),
            period: BonusPeriod::containing(contract.signed_date),
            base_amount,
            is_estimated: basis.is_estimated(),
            lines,
        })
    }

    fn role_bonus(
        &self,
        attribution: &RoleAttribution,
        basis: PoolBasis<'_>,
    ) -> Result<Option<RoleBonusResult>> {
        let Some(group) = self.taxonomy.group(attribution.group_id) else {
            return Ok(None);
        };
        let Some(role) = self.taxonomy.role_in_group(attribution.group_id, attribution.role_code)
        else {
            return Ok(None);
        };
        let allocation = allocate(group, &role, attribution.base_amount, basis)?;

        debug!(
            role = %attribution.role_code,
            group = %attribution.group_id,
            base_amount = %attribution.base_amount,
            final_percentage = %allocation.final_percentage,
            bonus = %allocation.bonus_amount,
            "role bonus allocated"
        );

        Ok(Some(RoleBonusResult {
            role_code: attribution.role_code,
            group_id: attribution.group_id,
            final_percentage: allocation.final_percentage,
            base_amount: attribution.base_amount,
            bonus_amount: allocation.bonus_amount,
            contract_count: attribution.contract_count,
            is_pool_based: role.is_pool_based,
            estimated_pool_amount: allocation.estimated_pool_amount,
        }))
    }

    fn definitions(&self, role_code: RoleCode) -> Option<(&GroupDefinition, RoleDefinition)> {
        let role = self.taxonomy.get_role_definition(role_code)?;
        let group = self.taxonomy.group(role.group_id)?;
        Some((group, role))
    }
}

#[cfg(test)]
mod tests {
    use bonuspool_domain::BonusPoolError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn calculator() -> BonusCalculator {
        BonusCalculator::new(Arc::new(Taxonomy::standard()), Arc::new(CurrencyTable::default()))
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date")
    }

    fn march_pool(amount: Decimal, revenue: Decimal) -> MonthlyPool {
        MonthlyPool::new(BonusPeriod { year: 2025, month: 3 }, amount, revenue, 0).expect("pool")
    }

    fn sales() -> (GroupDefinition, RoleDefinition) {
        let taxonomy = Taxonomy::standard();
        let group = *taxonomy.group(GroupId::Sales).expect("sales group");
        let role = taxonomy.role_in_group(GroupId::Sales, RoleCode::Closer).expect("closer");
        (group, role)
    }

    #[test]
    fn configured_pool_cascades_group_then_role() {
        let (group, role) = sales();
        let pool = march_pool(dec!(100000), dec!(1000000));

        let allocation = allocate(&group, &role, dec!(50000), PoolBasis::from_pool(Some(&pool)))
            .expect("in range");

        assert_eq!(allocation.final_percentage, dec!(16));
        assert_eq!(allocation.bonus_amount, dec!(800));
        assert_eq!(allocation.estimated_pool_amount, None);
    }

    #[test]
    fn fallback_is_a_pure_function_of_base_amount() {
        let (group, role) = sales();

        let allocation = allocate(&group, &role, dec!(50000), PoolBasis::Estimated).expect("in range");

        assert_eq!(allocation.final_percentage, dec!(40));
        assert_eq!(allocation.bonus_amount, dec!(800000));
        assert_eq!(allocation.estimated_pool_amount, Some(dec!(500000)));
    }

    #[test]
    fn zero_revenue_pool_falls_back_instead_of_dividing() {
        let pool = march_pool(dec!(100000), Decimal::ZERO);
        assert!(PoolBasis::from_pool(Some(&pool)).is_estimated());

        let empty_pool = march_pool(Decimal::ZERO, dec!(1000000));
        assert!(PoolBasis::from_pool(Some(&empty_pool)).is_estimated());
    }

    #[test]
    fn pool_split_divides_evenly() {
        let taxonomy = Taxonomy::standard();
        let group = *taxonomy.group(GroupId::Marketing).expect("marketing group");
        let role =
            taxonomy.role_in_group(GroupId::Marketing, RoleCode::Marketing).expect("marketing");

        let allocation = allocate_pool_split(&group, &role, dec!(5000), 2).expect("in range");
        assert_eq!(allocation.final_percentage, dec!(5));
        assert_eq!(allocation.bonus_amount, dec!(125));

        let nobody = allocate_pool_split(&group, &role, dec!(5000), 0).expect("in range");
        assert_eq!(nobody.bonus_amount, dec!(250));
    }

    #[test]
    fn attribution_counts_each_contract_once_per_slot() {
        let contracts = vec![
            SignedContract::new("L-1", dec!(1000), "USD", march(1))
                .with_assignment(RoleCode::Closer, "emp-1")
                .with_assignment(RoleCode::Expert, "emp-1"),
            SignedContract::new("L-2", dec!(500), "USD", march(2))
                .with_assignment(RoleCode::Closer, "emp-1"),
            SignedContract::new("L-3", dec!(9999), "USD", march(3))
                .with_assignment(RoleCode::Closer, "emp-2"),
        ];

        let attributions = calculator()
            .attribute_contracts("emp-1", RoleCategory::Sales(RoleCode::Closer), &contracts)
            .expect("in range");

        assert_eq!(
            attributions,
            vec![
                RoleAttribution {
                    role_code: RoleCode::Closer,
                    group_id: GroupId::Sales,
                    base_amount: dec!(1500),
                    contract_count: 2,
                },
                RoleAttribution {
                    role_code: RoleCode::Expert,
                    group_id: GroupId::Sales,
                    base_amount: dec!(1000),
                    contract_count: 1,
                },
            ]
        );
    }

    #[test]
    fn handler_path_ignores_sales_slots() {
        let contracts = vec![SignedContract::new("L-1", dec!(1000), "USD", march(1))
            .with_assignment(RoleCode::Closer, "emp-1")
            .with_assignment(RoleCode::Expert, "emp-1")];

        let attributions =
            calculator().attribute_contracts("emp-1", RoleCategory::Handler, &contracts).expect("in range");

        assert_eq!(attributions.len(), 1);
        assert_eq!(attributions[0].role_code, RoleCode::Expert);
        assert_eq!(attributions[0].group_id, GroupId::Handlers);
    }

    #[test]
    fn amounts_are_converted_before_summing() {
        let contracts = vec![SignedContract::new("L-1", dec!(1000), "EUR", march(1))
            .with_assignment(RoleCode::Closer, "emp-1")];

        let result = calculator()
            .contract_bonus(
                "emp-1",
                RoleCategory::Sales(RoleCode::Closer),
                BonusPeriod { year: 2025, month: 3 },
                &contracts,
                None,
            )
            .expect("in range");

        assert_eq!(result.role_bonuses[0].base_amount, dec!(1080));
        assert!(result.is_estimated);
    }

    #[test]
    fn preview_lists_every_attributed_slot() {
        let contract = SignedContract::new("L-9", dec!(50000), "USD", march(15))
            .with_assignment(RoleCode::Closer, "emp-1")
            .with_assignment(RoleCode::Expert, "emp-2")
            .with_assignment(RoleCode::Handler, "emp-3");
        let pool = march_pool(dec!(100000), dec!(1000000));

        let preview = calculator().preview_contract(&contract, Some(&pool)).expect("in range");

        assert!(!preview.is_estimated);
        assert_eq!(preview.lines.len(), 3);
        let expert = preview
            .lines
            .iter()
            .find(|line| line.role_code == RoleCode::Expert)
            .expect("expert line");
        assert_eq!(expert.group_id, GroupId::Sales);
        // 100000 * 40% * 10 * 0.05 / 100
        assert_eq!(expert.bonus_amount, dec!(200));
        let handler = preview
            .lines
            .iter()
            .find(|line| line.role_code == RoleCode::Handler)
            .expect("handler line");
        // 100000 * 30% * 70 * 0.05 / 100
        assert_eq!(handler.bonus_amount, dec!(1050));
        assert_eq!(preview.total().expect("in range"), dec!(800) + dec!(200) + dec!(1050));
    }

    #[test]
    fn oversized_figures_are_rejected_instead_of_panicking() {
        let (group, role) = sales();
        let pool = march_pool(Decimal::from_i128_with_scale(10_i128.pow(20), 0), dec!(1));
        let basis = PoolBasis::from_pool(Some(&pool));

        let result = allocate(&group, &role, dec!(1000000000), basis);
        assert!(matches!(result, Err(BonusPoolError::InvalidInput(_))));

        let estimated = allocate(&group, &role, Decimal::MAX, PoolBasis::Estimated);
        assert!(matches!(estimated, Err(BonusPoolError::InvalidInput(_))));

        let split = allocate_pool_split(&group, &role, Decimal::MAX, 1);
        assert!(matches!(split, Err(BonusPoolError::InvalidInput(_))));
    }
}
