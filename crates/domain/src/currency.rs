//! Static currency conversion
//!
//! Contract totals are recorded in their own currency and converted to the
//! base currency with a fixed rate table before any bonus arithmetic.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::CurrencyConfig;
use crate::errors::{BonusPoolError, Result};
use crate::utils::checked;

/// Fixed per-currency rates into the base currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyTable {
    base_currency: String,
    symbol: String,
    /// Keyed by upper-case currency id; value is base units per one unit.
    rates: BTreeMap<String, Decimal>,
}

impl CurrencyTable {
    /// Build a table. The base currency always converts at 1.
    pub fn new(
        base_currency: impl Into<String>,
        symbol: impl Into<String>,
        rates: impl IntoIterator<Item = (String, Decimal)>,
    ) -> Result<Self> {
        let base_currency = normalize(&base_currency.into());
        let mut table = BTreeMap::new();
        for (currency, rate) in rates {
            if rate <= Decimal::ZERO {
                return Err(BonusPoolError::Config(format!(
                    "conversion rate for {currency} must be positive, got {rate}"
                )));
            }
            table.insert(normalize(&currency), rate);
        }
        table.insert(base_currency.clone(), Decimal::ONE);

        Ok(Self { base_currency, symbol: symbol.into(), rates: table })
    }

    /// Build the table described by configuration.
    pub fn from_config(config: &CurrencyConfig) -> Result<Self> {
        Self::new(
            config.base_currency.clone(),
            config.symbol.clone(),
            config.rates.iter().map(|(currency, rate)| (currency.clone(), *rate)),
        )
    }

    /// Base currency id.
    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Display symbol of the base currency.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Rate for `currency_id`, if the table knows it.
    pub fn rate(&self, currency_id: &str) -> Option<Decimal> {
        self.rates.get(&normalize(currency_id)).copied()
    }

    /// Convert `amount` into the base currency.
    ///
    /// Currencies missing from the table are treated as already being in the
    /// base currency; callers that care can check [`CurrencyTable::rate`].
    ///
    /// # Errors
    /// `InvalidInput` when the converted amount overflows.
    pub fn to_base_currency(&self, amount: Decimal, currency_id: &str) -> Result<Decimal> {
        match self.rate(currency_id) {
            Some(rate) => checked::mul("currency conversion", amount, rate),
            None => Ok(amount),
        }
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        let config = CurrencyConfig::default();
        Self {
            base_currency: normalize(&config.base_currency),
            symbol: config.symbol,
            rates: config.rates.into_iter().map(|(id, rate)| (normalize(&id), rate)).collect(),
        }
    }
}

fn normalize(currency_id: &str) -> String {
    currency_id.trim().to_ascii_uppercase()
}
