//! Benchmarks for the ranking engines.

use autorank::model::{FuelType, Vehicle};
use autorank::scoring::{
    percentile_score, Category, Direction, RecommendationSession, StrategyKind, WeightUpdate,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const MAKES: [&str; 8] = [
    "Toyota", "Honda", "Ford", "Tesla", "BMW", "Kia", "Subaru", "Mercedes-Benz",
];

fn population(n: usize) -> Vec<Vehicle> {
    (0..n)
        .map(|i| {
            let f = i as f64;
            Vehicle::new(MAKES[i % MAKES.len()], format!("Model {i}"), 2015 + (i % 10) as i32)
                .with_price(18_000.0 + (f * 731.0) % 60_000.0)
                .with_running_costs(
                    800.0 + (f * 37.0) % 2_500.0,
                    400.0 + (f * 13.0) % 1_200.0,
                    900.0 + (f * 29.0) % 1_800.0,
                )
                .with_depreciation(20.0 + (f * 7.0) % 30.0)
                .with_reliability(5.0 + (f * 0.37) % 5.0)
                .with_style(3.0 + (f * 0.53) % 7.0)
                .with_fuel_type(match i % 3 {
                    0 => FuelType::Gas,
                    1 => FuelType::Hybrid,
                    _ => FuelType::Electric,
                })
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    for size in [10, 100, 1_000] {
        let vehicles = population(size);
        for strategy in [StrategyKind::Weighted, StrategyKind::Composite] {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), size),
                &vehicles,
                |b, vehicles| {
                    b.iter(|| {
                        let mut session = RecommendationSession::new().with_strategy(strategy);
                        black_box(session.rank(black_box(vehicles)))
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_rerank(c: &mut Criterion) {
    let vehicles = population(500);
    let mut session = RecommendationSession::new().with_strategy(StrategyKind::Composite);
    session.rank(&vehicles);

    c.bench_function("rerank_composite_500_warm_cache", |b| {
        b.iter(|| black_box(session.rerank()));
    });

    let mut weighted = RecommendationSession::new();
    weighted.rank(&vehicles);
    c.bench_function("update_weights_and_rerank_500", |b| {
        let mut style = 1.0;
        b.iter(|| {
            style = if style > 9.0 { 1.0 } else { style + 1.0 };
            let _ = weighted.update_weights(&WeightUpdate::single(Category::Style, style));
            black_box(weighted.rerank())
        });
    });
}

fn bench_percentile(c: &mut Criterion) {
    let values: Vec<f64> = (0..1_000).map(|i| f64::from(i) * 17.0 % 997.0).collect();
    c.bench_function("percentile_score_1000", |b| {
        b.iter(|| {
            black_box(percentile_score(
                black_box(500.0),
                black_box(&values),
                Direction::LowerIsBetter,
            ))
        });
    });
}

criterion_group!(benches, bench_rank, bench_rerank, bench_percentile);
criterion_main!(benches);
