//! Signed contract types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RoleCode;

/// Employee identifier as issued by the employee directory.
pub type EmployeeId = String;

/// A lead that reached the agreement-signed pipeline stage.
///
/// Role attributions are independent: one contract can name a closer, a
/// handler and a scheduler at the same time, and the same employee may hold
/// several slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedContract {
    pub id: String,
    /// Contract total in `currency_id`, not yet converted.
    pub total_amount: Decimal,
    pub currency_id: String,
    pub signed_date: NaiveDate,
    #[serde(default)]
    pub role_assignments: BTreeMap<RoleCode, EmployeeId>,
}

impl SignedContract {
    /// Create a contract without any role attributions.
    pub fn new(
        id: impl Into<String>,
        total_amount: Decimal,
        currency_id: impl Into<String>,
        signed_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            total_amount,
            currency_id: currency_id.into(),
            signed_date,
            role_assignments: BTreeMap::new(),
        }
    }

    /// Attribute a role slot to an employee (builder style).
    pub fn with_assignment(mut self, slot: RoleCode, employee_id: impl Into<EmployeeId>) -> Self {
        self.role_assignments.insert(slot, employee_id.into());
        self
    }

    /// Employee attributed to `slot`, if any.
    ///
    /// Only contract slots are honored; an entry for a pool-based or
    /// partner role in `role_assignments` never attributes the contract.
    pub fn assignee(&self, slot: RoleCode) -> Option<&str> {
        if !slot.is_contract_slot() {
            return None;
        }
        self.role_assignments.get(&slot).map(String::as_str)
    }

    /// Whether `employee_id` holds `slot` on this contract.
    pub fn is_attributed(&self, slot: RoleCode, employee_id: &str) -> bool {
        self.assignee(slot) == Some(employee_id)
    }
}
