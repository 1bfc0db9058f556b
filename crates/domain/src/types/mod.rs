//! Domain types and models

pub mod bonus;
pub mod contract;
pub mod employee;
pub mod pool;
pub mod role;

pub use bonus::{ContractBonusLine, ContractBonusPreview, EmployeeBonusResult, RoleBonusResult};
pub use contract::{EmployeeId, SignedContract};
pub use employee::Employee;
pub use pool::{pool_percentage, BonusPeriod, MonthlyPool};
pub use role::{GroupDefinition, GroupId, RoleCode, RoleDefinition};
