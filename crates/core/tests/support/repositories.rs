//! Mock repository implementations for testing
//!
//! In-memory mocks for the core ports. Each records how often it was called
//! and can be told to fail or stall, so error propagation and timeouts can be
//! exercised without a database.

use std::time::Duration;

use async_trait::async_trait;
use bonuspool_core::{EmployeeDirectory, MonthlyPoolRepository, SignedContractRepository};
use bonuspool_domain::{
    BonusPeriod, BonusPoolError, Employee, MonthlyPool, Result as DomainResult, RoleCategory,
    RoleCode, SignedContract,
};
use chrono::NaiveDate;
use parking_lot::Mutex;
use uuid::Uuid;

/// Failure injection shared by the mocks.
#[derive(Debug, Clone, Default)]
struct Behaviour {
    failure: Option<BonusPoolError>,
    delay: Option<Duration>,
}

impl Behaviour {
    async fn apply(&self) -> DomainResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// In-memory mock for `SignedContractRepository`.
#[derive(Default)]
pub struct MockContractRepository {
    contracts: Vec<SignedContract>,
    behaviour: Behaviour,
    calls: Mutex<usize>,
}

impl MockContractRepository {
    pub fn new(contracts: Vec<SignedContract>) -> Self {
        Self { contracts, ..Self::default() }
    }

    pub fn failing(err: BonusPoolError) -> Self {
        Self { behaviour: Behaviour { failure: Some(err), delay: None }, ..Self::default() }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self { behaviour: Behaviour { failure: None, delay: Some(delay) }, ..Self::default() }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl SignedContractRepository for MockContractRepository {
    async fn fetch_signed_contracts(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<SignedContract>> {
        *self.calls.lock() += 1;
        self.behaviour.apply().await?;
        Ok(self
            .contracts
            .iter()
            .filter(|contract| contract.signed_date >= from && contract.signed_date <= to)
            .cloned()
            .collect())
    }
}

/// In-memory mock for `MonthlyPoolRepository`, keyed by period.
#[derive(Default)]
pub struct MockPoolRepository {
    pools: Mutex<Vec<MonthlyPool>>,
    behaviour: Behaviour,
    fetches: Mutex<usize>,
}

impl MockPoolRepository {
    pub fn new(pools: Vec<MonthlyPool>) -> Self {
        Self { pools: Mutex::new(pools), ..Self::default() }
    }

    pub fn failing(err: BonusPoolError) -> Self {
        Self { behaviour: Behaviour { failure: Some(err), delay: None }, ..Self::default() }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self { behaviour: Behaviour { failure: None, delay: Some(delay) }, ..Self::default() }
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock()
    }

    pub fn stored(&self) -> Vec<MonthlyPool> {
        self.pools.lock().clone()
    }
}

#[async_trait]
impl MonthlyPoolRepository for MockPoolRepository {
    async fn fetch_pool(&self, period: BonusPeriod) -> DomainResult<Option<MonthlyPool>> {
        *self.fetches.lock() += 1;
        self.behaviour.apply().await?;
        Ok(self.pools.lock().iter().find(|pool| pool.period() == period).cloned())
    }

    async fn persist_pool(&self, mut pool: MonthlyPool) -> DomainResult<MonthlyPool> {
        self.behaviour.apply().await?;
        let mut pools = self.pools.lock();
        match pools.iter_mut().find(|existing| existing.period() == pool.period()) {
            Some(existing) => {
                pool.id = existing.id;
                *existing = pool.clone();
            }
            None => pools.push(pool.clone()),
        }
        Ok(pool)
    }

    async fn delete_pool(&self, id: Uuid) -> DomainResult<()> {
        self.behaviour.apply().await?;
        self.pools.lock().retain(|pool| pool.id != id);
        Ok(())
    }

    async fn list_pools(&self) -> DomainResult<Vec<MonthlyPool>> {
        self.behaviour.apply().await?;
        let mut pools = self.pools.lock().clone();
        pools.sort_by(|a, b| b.period().cmp(&a.period()));
        Ok(pools)
    }
}

/// In-memory mock for `EmployeeDirectory`.
#[derive(Default)]
pub struct MockEmployeeDirectory {
    employees: Vec<Employee>,
    behaviour: Behaviour,
    calls: Mutex<usize>,
}

impl MockEmployeeDirectory {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees, ..Self::default() }
    }

    pub fn failing(err: BonusPoolError) -> Self {
        Self { behaviour: Behaviour { failure: Some(err), delay: None }, ..Self::default() }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl EmployeeDirectory for MockEmployeeDirectory {
    async fn list_active_employees(&self) -> DomainResult<Vec<Employee>> {
        *self.calls.lock() += 1;
        self.behaviour.apply().await?;
        Ok(self.employees.iter().filter(|employee| employee.is_active).cloned().collect())
    }

    async fn count_active_with_role(&self, role_code: RoleCode) -> DomainResult<usize> {
        *self.calls.lock() += 1;
        self.behaviour.apply().await?;
        Ok(self
            .employees
            .iter()
            .filter(|employee| {
                employee.is_active
                    && RoleCategory::classify(&employee.role_code) == RoleCategory::Pool(role_code)
            })
            .count())
    }
}
