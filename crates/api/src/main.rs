//! Bonuspool - monthly bonus report
//!
//! Usage: `bonuspool YYYY-MM [manual-pool-amount]`
//!
//! Prints every active employee's bonus for the month as JSON on stdout.

use std::str::FromStr;

use anyhow::{bail, Context};
use bonuspool_domain::BonusPeriod;
use bonuspool_lib::{compute_monthly_bonus_report, utils::init_tracing, AppContext};
use rust_decimal::Decimal;

const USAGE: &str = "usage: bonuspool YYYY-MM [manual-pool-amount]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before tracing so RUST_LOG from the file applies
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let mut args = std::env::args().skip(1);
    let Some(period_arg) = args.next() else {
        bail!(USAGE);
    };
    let period = BonusPeriod::from_str(&period_arg).context(USAGE)?;
    let manual_pool_amount = args
        .next()
        .map(|raw| Decimal::from_str(raw.trim()))
        .transpose()
        .with_context(|| format!("manual pool amount must be a number; {USAGE}"))?;

    let ctx = AppContext::new().await.context("failed to initialise application context")?;
    let report = compute_monthly_bonus_report(&ctx, period, manual_pool_amount)
        .await
        .with_context(|| format!("failed to compute bonuses for {period}"))?;

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}
