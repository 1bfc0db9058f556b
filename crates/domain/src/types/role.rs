//! Role and group codes
//!
//! A role code names an employee's function on a contract (closer, handler,
//! ...). Every role belongs to a bonus group that receives a fixed share of
//! the monthly pool.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee role code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleCode {
    Scheduler,
    Manager,
    /// Assisting closer, recorded on contracts as the lawyer slot.
    HelperCloser,
    Closer,
    Expert,
    Handler,
    Marketing,
    Collection,
    Partners,
}

crate::impl_domain_code_conversions!(RoleCode {
    Scheduler => "scheduler",
    Manager => "manager",
    HelperCloser => "helper-closer",
    Closer => "closer",
    Expert => "expert",
    Handler => "handler",
    Marketing => "marketing",
    Collection => "collection",
    Partners => "partners",
} aliases {
    "lawyer" => HelperCloser,
    "c" => Closer,
    "h" => Handler,
    "e" => Expert,
});

impl RoleCode {
    /// Role slots a signed contract can carry an attribution for.
    pub const CONTRACT_SLOTS: [Self; 6] =
        [Self::Scheduler, Self::Manager, Self::HelperCloser, Self::Closer, Self::Expert, Self::Handler];

    /// Whether contracts carry an attribution slot for this role.
    pub fn is_contract_slot(self) -> bool {
        Self::CONTRACT_SLOTS.contains(&self)
    }
}

/// Bonus group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupId {
    Sales,
    Handlers,
    Marketing,
    Collection,
    Partners,
}

crate::impl_domain_code_conversions!(GroupId {
    Sales => "sales",
    Handlers => "handlers",
    Marketing => "marketing",
    Collection => "collection",
    Partners => "partners",
});

/// A role's position inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub role_code: RoleCode,
    pub group_id: GroupId,
    /// Share of the group's allocation, 0-100.
    pub in_group_percentage: Decimal,
    /// Paid as a flat split of the group allocation instead of by contracts.
    pub is_pool_based: bool,
}

/// A group's share of the monthly bonus pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub group_id: GroupId,
    /// Share of the monthly pool, 0-100.
    pub pool_share_percentage: Decimal,
}
