#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use loyalty_quote::domain::entities::{PromotionResult, QuoteResponse};
use loyalty_quote::domain::services::PointsCalculator;
use loyalty_quote::domain::value_objects::CustomerTier;
use rust_decimal::Decimal;
use std::hint::black_box;

fn breakdown_benchmark(c: &mut Criterion) {
    let calculator = PointsCalculator::default();
    let promotion = PromotionResult::new(25, true);
    let rate = Decimal::new(367, 2);

    let mut group = c.benchmark_group("Points Breakdown");

    for fare in [Decimal::new(123450, 2), Decimal::new(1_000_000, 0)] {
        group.bench_with_input(BenchmarkId::new("fare", fare), &fare, |b, fare| {
            b.iter(|| {
                let base = calculator.base_points(black_box(*fare));
                let breakdown = calculator.breakdown(base, black_box(CustomerTier::Gold), &promotion);
                QuoteResponse::new(breakdown, rate, &promotion)
            })
        });
    }

    group.finish();
}

fn tier_benchmark(c: &mut Criterion) {
    let calculator = PointsCalculator::default();

    c.bench_function("tier_bonus/platinum", |b| {
        b.iter(|| calculator.tier_bonus(black_box(123_456), black_box(CustomerTier::Platinum)))
    });
}

criterion_group!(benches, breakdown_benchmark, tier_benchmark);
criterion_main!(benches);
