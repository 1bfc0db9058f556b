//! Shared test helpers for `bonuspool-core` integration tests.
//!
//! In-memory port implementations plus contract and pool fixtures, so the
//! service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod repositories;

use std::sync::Arc;

use bonuspool_core::{BonusService, PoolAdministrationService};
use bonuspool_domain::{BonusPeriod, CurrencyTable, MonthlyPool, RoleCode, SignedContract, Taxonomy};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub use repositories::{MockContractRepository, MockEmployeeDirectory, MockPoolRepository};

pub const MARCH_2025: BonusPeriod = BonusPeriod { year: 2025, month: 3 };

/// Day in March 2025.
pub fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).expect("valid March date")
}

/// USD contract signed on `day` of March 2025 with one slot assigned.
pub fn contract(id: &str, amount: Decimal, day: u32, slot: RoleCode, employee: &str) -> SignedContract {
    SignedContract::new(id, amount, "USD", march(day)).with_assignment(slot, employee)
}

/// Day in April 2025.
pub fn april(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, day).expect("valid April date")
}

/// Pool for April 2025.
pub fn april_pool(amount: Decimal, revenue: Decimal) -> MonthlyPool {
    MonthlyPool::new(BonusPeriod { year: 2025, month: 4 }, amount, revenue, 1_700_000_000)
        .expect("pool")
}

/// Pool for March 2025.
pub fn march_pool(amount: Decimal, revenue: Decimal) -> MonthlyPool {
    MonthlyPool::new(MARCH_2025, amount, revenue, 1_700_000_000).expect("pool")
}

/// Mocks wired into both services.
pub struct Harness {
    pub contracts: Arc<MockContractRepository>,
    pub pools: Arc<MockPoolRepository>,
    pub directory: Arc<MockEmployeeDirectory>,
}

impl Harness {
    pub fn new(
        contracts: MockContractRepository,
        pools: MockPoolRepository,
        directory: MockEmployeeDirectory,
    ) -> Self {
        Self { contracts: Arc::new(contracts), pools: Arc::new(pools), directory: Arc::new(directory) }
    }

    pub fn bonus_service(&self) -> BonusService {
        BonusService::new(
            self.contracts.clone(),
            self.pools.clone(),
            self.directory.clone(),
            Arc::new(Taxonomy::standard()),
            Arc::new(CurrencyTable::default()),
        )
    }

    pub fn pool_service(&self) -> PoolAdministrationService {
        PoolAdministrationService::new(
            self.pools.clone(),
            self.contracts.clone(),
            Arc::new(CurrencyTable::default()),
        )
    }
}
