//! Bonus calculator benchmarks
//!
//! Measures the pure allocation path, which dominates batch runs once the
//! contracts and pool have been fetched.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench --bench bonus_calculator
//! cargo bench --bench bonus_calculator -- contract_bonus
//! ```

use std::sync::Arc;

use bonuspool_core::BonusCalculator;
use bonuspool_domain::{
    BonusPeriod, CurrencyTable, MonthlyPool, RoleCategory, RoleCode, SignedContract, Taxonomy,
};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

const PERIOD: BonusPeriod = BonusPeriod { year: 2025, month: 3 };

// ============================================================================
// Fixtures
// ============================================================================

fn contracts(count: usize) -> Vec<SignedContract> {
    let currencies = ["USD", "EUR", "GBP", "ILS"];
    (0..count)
        .map(|i| {
            let day = (i % 28) as u32 + 1;
            let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap_or_default();
            SignedContract::new(
                format!("L-{i}"),
                Decimal::from(1_000 + (i as u64 * 37) % 9_000),
                currencies[i % currencies.len()],
                date,
            )
            .with_assignment(RoleCode::Closer, format!("emp-{}", i % 20))
            .with_assignment(RoleCode::Expert, format!("emp-{}", (i + 7) % 20))
            .with_assignment(RoleCode::Handler, format!("emp-{}", (i + 3) % 20))
        })
        .collect()
}

fn calculator() -> BonusCalculator {
    BonusCalculator::new(Arc::new(Taxonomy::standard()), Arc::new(CurrencyTable::default()))
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_contract_bonus(c: &mut Criterion) {
    let calculator = calculator();
    let pool = MonthlyPool::new(PERIOD, Decimal::from(100_000), Decimal::from(1_000_000), 0)
        .expect("pool");
    let mut group = c.benchmark_group("contract_bonus");

    for size in [100_usize, 1_000, 10_000] {
        let contracts = contracts(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("configured_pool", size), &contracts, |b, contracts| {
            b.iter(|| {
                calculator.contract_bonus(
                    black_box("emp-3"),
                    RoleCategory::Sales(RoleCode::Closer),
                    PERIOD,
                    contracts,
                    Some(&pool),
                )
            });
        });
        group.bench_with_input(BenchmarkId::new("estimated", size), &contracts, |b, contracts| {
            b.iter(|| {
                calculator.contract_bonus(
                    black_box("emp-3"),
                    RoleCategory::Handler,
                    PERIOD,
                    contracts,
                    None,
                )
            });
        });
    }

    group.finish();
}

fn bench_preview(c: &mut Criterion) {
    let calculator = calculator();
    let pool = MonthlyPool::new(PERIOD, Decimal::from(100_000), Decimal::from(1_000_000), 0)
        .expect("pool");
    let contract = contracts(1).remove(0);

    c.bench_function("preview_contract", |b| {
        b.iter(|| calculator.preview_contract(black_box(&contract), Some(&pool)));
    });
}

criterion_group!(benches, bench_contract_bonus, bench_preview);
criterion_main!(benches);
