//! Port interfaces for bonus calculation
//!
//! These traits define the boundaries between the bonus engine and the
//! stores it reads contracts and employees from.

use async_trait::async_trait;
use bonuspool_domain::{Employee, Result, RoleCode, SignedContract};
use chrono::NaiveDate;

/// Read access to contracts that reached the agreement-signed stage.
#[async_trait]
pub trait SignedContractRepository: Send + Sync {
    /// Signed contracts whose signed date lies in `[from, to]` (inclusive).
    ///
    /// Amounts are returned in each contract's own currency.
    async fn fetch_signed_contracts(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SignedContract>>;
}

/// Read access to the employee directory.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Active employees, in a stable order.
    async fn list_active_employees(&self) -> Result<Vec<Employee>>;

    /// Number of active employees holding `role_code`.
    async fn count_active_with_role(&self, role_code: RoleCode) -> Result<usize>;
}
