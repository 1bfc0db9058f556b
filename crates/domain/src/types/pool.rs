//! Monthly bonus pool types

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BonusPoolError, Result};
use crate::utils::checked;

/// Calendar month a pool and its bonuses belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BonusPeriod {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl BonusPeriod {
    /// Build a period, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BonusPoolError::InvalidInput(format!("month out of range: {month}")));
        }
        Ok(Self { year, month })
    }

    /// Period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// First day of the period.
    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| BonusPoolError::InvalidInput(format!("invalid period {self}")))
    }

    /// Last day of the period.
    pub fn last_day(&self) -> Result<NaiveDate> {
        let (year, month) =
            if self.month == 12 { (self.year + 1, 1) } else { (self.year, self.month + 1) };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| BonusPoolError::InvalidInput(format!("invalid period {self}")))
    }
}

impl std::fmt::Display for BonusPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for BonusPeriod {
    type Err = BonusPoolError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BonusPoolError::InvalidInput(format!("expected YYYY-MM, got '{s}'"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Administrator-configured bonus budget for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPool {
    pub id: Uuid,
    pub year: i32,
    pub month: u32,
    pub total_bonus_pool_amount: Decimal,
    pub total_revenue: Decimal,
    /// `total_bonus_pool_amount / total_revenue * 100`, or zero without revenue.
    pub pool_percentage: Decimal,
    /// Unix epoch seconds of the last write.
    pub updated_at: i64,
}

impl MonthlyPool {
    /// Build a pool record, deriving its pool percentage.
    ///
    /// # Errors
    /// `InvalidInput` when the percentage overflows.
    pub fn new(
        period: BonusPeriod,
        total_bonus_pool_amount: Decimal,
        total_revenue: Decimal,
        updated_at: i64,
    ) -> Result<Self> {
        Ok(Self {
            id: Uuid::now_v7(),
            year: period.year,
            month: period.month,
            total_bonus_pool_amount,
            total_revenue,
            pool_percentage: pool_percentage(total_bonus_pool_amount, total_revenue)?,
            updated_at,
        })
    }

    /// Period this pool is keyed by.
    pub fn period(&self) -> BonusPeriod {
        BonusPeriod { year: self.year, month: self.month }
    }

    /// Whether the pool can drive a proportional calculation.
    ///
    /// A pool without revenue or with a non-positive percentage behaves as if
    /// no pool were configured, so the revenue division is never attempted.
    pub fn is_effective(&self) -> bool {
        self.total_revenue > Decimal::ZERO && self.pool_percentage > Decimal::ZERO
    }
}

/// Pool share of revenue in percent; zero when there is no revenue.
///
/// # Errors
/// `InvalidInput` when the ratio overflows.
pub fn pool_percentage(
    total_bonus_pool_amount: Decimal,
    total_revenue: Decimal,
) -> Result<Decimal> {
    if total_revenue <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let ratio = checked::div("pool percentage", total_bonus_pool_amount, total_revenue)?;
    checked::mul("pool percentage", ratio, Decimal::ONE_HUNDRED)
}
