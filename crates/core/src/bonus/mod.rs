//! Bonus calculation: ports, allocation arithmetic and the service that
//! ties them together

pub mod calculator;
pub mod ports;
pub mod service;

pub use calculator::{
    allocate, allocate_pool_split, Allocation, BonusCalculator, PoolBasis, PoolSplit,
    RoleAttribution,
};
pub use service::BonusService;
