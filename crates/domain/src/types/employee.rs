//! Employee directory types

use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Directory record of an employee.
///
/// `role_code` stays a raw string: codes the taxonomy does not know still
/// reach the bonus engine, which answers them with an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role_code: String,
    pub is_active: bool,
}

impl Employee {
    /// Active employee with the given role code.
    pub fn active(id: impl Into<EmployeeId>, name: impl Into<String>, role_code: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), role_code: role_code.into(), is_active: true }
    }
}
