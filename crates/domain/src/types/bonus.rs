//! Bonus calculation results
//!
//! Results are computed on demand and never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BonusPeriod, EmployeeId, GroupId, RoleCode};
use crate::errors::Result;
use crate::utils::checked;

/// Bonus earned through one role the employee held during the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBonusResult {
    pub role_code: RoleCode,
    /// Group the allocation was drawn from.
    pub group_id: GroupId,
    pub final_percentage: Decimal,
    /// Base-currency revenue attributed to the role, or the split pool amount
    /// for pool-based roles.
    pub base_amount: Decimal,
    pub bonus_amount: Decimal,
    pub contract_count: usize,
    pub is_pool_based: bool,
    /// Placeholder pool synthesised when no monthly pool is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_pool_amount: Option<Decimal>,
}

/// Bonus breakdown for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeBonusResult {
    pub employee_id: EmployeeId,
    pub period: BonusPeriod,
    /// Sum of `role_bonuses[].bonus_amount`.
    pub total_bonus: Decimal,
    pub role_bonuses: Vec<RoleBonusResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_based_bonus: Option<Decimal>,
    /// Set when any figure comes from the fallback estimate rather than a
    /// configured pool. Such figures are display placeholders only.
    pub is_estimated: bool,
}

impl EmployeeBonusResult {
    /// Result with no role bonuses.
    pub fn empty(employee_id: impl Into<EmployeeId>, period: BonusPeriod) -> Self {
        Self {
            employee_id: employee_id.into(),
            period,
            total_bonus: Decimal::ZERO,
            role_bonuses: Vec::new(),
            pool_based_bonus: None,
            is_estimated: false,
        }
    }

    /// Assemble a result from role bonuses, deriving the total.
    ///
    /// # Errors
    /// `InvalidInput` when the totals overflow.
    pub fn from_roles(
        employee_id: impl Into<EmployeeId>,
        period: BonusPeriod,
        role_bonuses: Vec<RoleBonusResult>,
        is_estimated: bool,
    ) -> Result<Self> {
        let total_bonus = checked::sum(
            "employee bonus total",
            role_bonuses.iter().map(|role| role.bonus_amount),
        )?;
        let pool_based_bonus = if role_bonuses.iter().any(|role| role.is_pool_based) {
            Some(checked::sum(
                "pool-based bonus total",
                role_bonuses.iter().filter(|role| role.is_pool_based).map(|role| role.bonus_amount),
            )?)
        } else {
            None
        };

        Ok(Self {
            employee_id: employee_id.into(),
            period,
            total_bonus,
            role_bonuses,
            pool_based_bonus,
            is_estimated,
        })
    }

    /// Bonus for a specific role, if the employee earned one.
    pub fn role(&self, role_code: RoleCode) -> Option<&RoleBonusResult> {
        self.role_bonuses.iter().find(|role| role.role_code == role_code)
    }
}

/// Per-slot bonus preview for a single contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractBonusLine {
    pub role_code: RoleCode,
    pub employee_id: EmployeeId,
    pub group_id: GroupId,
    pub final_percentage: Decimal,
    pub bonus_amount: Decimal,
}

/// What each attributed employee would earn from one contract alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractBonusPreview {
    pub contract_id: String,
    pub period: BonusPeriod,
    /// Contract total in base currency.
    pub base_amount: Decimal,
    pub is_estimated: bool,
    pub lines: Vec<ContractBonusLine>,
}

impl ContractBonusPreview {
    /// Sum of all line amounts.
    ///
    /// # Errors
    /// `InvalidInput` when the sum overflows.
    pub fn total(&self) -> Result<Decimal> {
        checked::sum("contract preview total", self.lines.iter().map(|line| line.bonus_amount))
    }
}
