//! Role taxonomy
//!
//! Static configuration of bonus groups, their share of the monthly pool,
//! and each role's share inside its group.
//!
//! | Group      | Pool share | Roles (in-group share)                                           |
//! |------------|-----------:|------------------------------------------------------------------|
//! | sales      | 40 | scheduler 30, manager 20, closer 40, helper-closer 25, expert 10 |
//! | handlers   | 30 | handler 70, expert 10                                            |
//! | marketing  |  5 | marketing 100 (pool-based)                                       |
//! | collection |  5 | collection 100 (pool-based)                                      |
//! | partners   | 20 | partners 100 (pool-based)                                        |
//!
//! `expert` belongs to both sales and handlers. Role-only lookups resolve it
//! to sales; the bonus engine avoids that ambiguity by asking for a role
//! within the group its matching path already determined
//! ([`Taxonomy::role_in_group`]).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{BonusPoolError, Result};
use crate::types::{GroupDefinition, GroupId, RoleCode, RoleDefinition};

/// How an employee's bonus is calculated, resolved once from the role code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    /// Contract-attributed sales role.
    Sales(RoleCode),
    /// Contract-attributed handler.
    Handler,
    /// Flat split of a pool amount across everyone holding the role.
    Pool(RoleCode),
    /// No calculation applies.
    Unknown,
}

impl RoleCategory {
    /// Resolve a raw role code.
    pub fn classify(code: &str) -> Self {
        match code.parse::<RoleCode>() {
            Ok(
                role @ (RoleCode::Scheduler
                | RoleCode::Manager
                | RoleCode::HelperCloser
                | RoleCode::Closer
                | RoleCode::Expert),
            ) => Self::Sales(role),
            Ok(RoleCode::Handler) => Self::Handler,
            Ok(role @ (RoleCode::Marketing | RoleCode::Collection | RoleCode::Partners)) => {
                Self::Pool(role)
            }
            Err(_) => Self::Unknown,
        }
    }

    /// Contract slots searched for the employee, each with the group whose
    /// allocation pays for a match in that slot.
    ///
    /// The sales path also searches the handler slot, paying it from the
    /// handlers group.
    pub fn attribution_slots(&self) -> &'static [(RoleCode, GroupId)] {
        const SALES: &[(RoleCode, GroupId)] = &[
            (RoleCode::Scheduler, GroupId::Sales),
            (RoleCode::Manager, GroupId::Sales),
            (RoleCode::HelperCloser, GroupId::Sales),
            (RoleCode::Closer, GroupId::Sales),
            (RoleCode::Expert, GroupId::Sales),
            (RoleCode::Handler, GroupId::Handlers),
        ];
        const HANDLERS: &[(RoleCode, GroupId)] =
            &[(RoleCode::Handler, GroupId::Handlers), (RoleCode::Expert, GroupId::Handlers)];

        match self {
            Self::Sales(_) => SALES,
            Self::Handler => HANDLERS,
            Self::Pool(_) | Self::Unknown => &[],
        }
    }
}

/// Outcome of [`Taxonomy::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxonomySummary {
    /// Sum of every group's pool share.
    pub total_pool_share: Decimal,
}

impl TaxonomySummary {
    /// Whether the groups distribute the entire pool.
    pub fn is_fully_allocated(&self) -> bool {
        self.total_pool_share == Decimal::ONE_HUNDRED
    }
}

/// Immutable role/group configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    /// Lookup order matters: sales is consulted before handlers.
    groups: Vec<GroupDefinition>,
    roles: Vec<RoleDefinition>,
}

impl Taxonomy {
    /// Build a taxonomy from explicit definitions.
    ///
    /// Every role must reference a defined group; use [`Taxonomy::validate`]
    /// to check the percentage invariants.
    pub fn new(groups: Vec<GroupDefinition>, roles: Vec<RoleDefinition>) -> Result<Self> {
        if let Some(orphan) =
            roles.iter().find(|role| !groups.iter().any(|group| group.group_id == role.group_id))
        {
            return Err(BonusPoolError::Config(format!(
                "role {} references undefined group {}",
                orphan.role_code, orphan.group_id
            )));
        }
        Ok(Self { groups, roles })
    }

    /// The firm's fixed bonus taxonomy.
    pub fn standard() -> Self {
        let group = |group_id, share: u32| GroupDefinition {
            group_id,
            pool_share_percentage: Decimal::from(share),
        };
        let role = |role_code, group_id, share: u32, is_pool_based| RoleDefinition {
            role_code,
            group_id,
            in_group_percentage: Decimal::from(share),
            is_pool_based,
        };

        Self {
            groups: vec![
                group(GroupId::Sales, 40),
                group(GroupId::Handlers, 30),
                group(GroupId::Marketing, 5),
                group(GroupId::Collection, 5),
                group(GroupId::Partners, 20),
            ],
            roles: vec![
                role(RoleCode::Scheduler, GroupId::Sales, 30, false),
                role(RoleCode::Manager, GroupId::Sales, 20, false),
                role(RoleCode::Closer, GroupId::Sales, 40, false),
                role(RoleCode::HelperCloser, GroupId::Sales, 25, false),
                role(RoleCode::Expert, GroupId::Sales, 10, false),
                role(RoleCode::Handler, GroupId::Handlers, 70, false),
                role(RoleCode::Expert, GroupId::Handlers, 10, false),
                role(RoleCode::Marketing, GroupId::Marketing, 100, true),
                role(RoleCode::Collection, GroupId::Collection, 100, true),
                role(RoleCode::Partners, GroupId::Partners, 100, true),
            ],
        }
    }

    /// Group definition by id.
    pub fn group(&self, group_id: GroupId) -> Option<&GroupDefinition> {
        self.groups.iter().find(|group| group.group_id == group_id)
    }

    /// All groups in lookup order.
    pub fn groups(&self) -> &[GroupDefinition] {
        &self.groups
    }

    /// First group (in lookup order) that lists `role_code`.
    pub fn get_group_for_role(&self, role_code: RoleCode) -> Option<&GroupDefinition> {
        self.get_role_definition(role_code).and_then(|role| self.group(role.group_id))
    }

    /// Role definition from the first group (in lookup order) listing it.
    pub fn get_role_definition(&self, role_code: RoleCode) -> Option<RoleDefinition> {
        self.groups.iter().find_map(|group| self.role_in_group(group.group_id, role_code))
    }

    /// Role definition inside a specific group.
    pub fn role_in_group(&self, group_id: GroupId, role_code: RoleCode) -> Option<RoleDefinition> {
        self.roles
            .iter()
            .find(|role| role.group_id == group_id && role.role_code == role_code)
            .copied()
    }

    /// Check the percentage invariants.
    ///
    /// Every percentage must lie in 0-100 and the group shares must not sum
    /// above 100. Shares are never renormalised.
    pub fn validate(&self) -> Result<TaxonomySummary> {
        let in_range = |value: Decimal| value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED;

        if let Some(group) = self.groups.iter().find(|g| !in_range(g.pool_share_percentage)) {
            return Err(BonusPoolError::Config(format!(
                "group {} pool share {} outside 0-100",
                group.group_id, group.pool_share_percentage
            )));
        }
        if let Some(role) = self.roles.iter().find(|r| !in_range(r.in_group_percentage)) {
            return Err(BonusPoolError::Config(format!(
                "role {} in group {} share {} outside 0-100",
                role.role_code, role.group_id, role.in_group_percentage
            )));
        }

        let total_pool_share: Decimal =
            self.groups.iter().map(|group| group.pool_share_percentage).sum();
        if total_pool_share > Decimal::ONE_HUNDRED {
            return Err(BonusPoolError::Config(format!(
                "group pool shares sum to {total_pool_share}, above 100"
            )));
        }

        Ok(TaxonomySummary { total_pool_share })
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
