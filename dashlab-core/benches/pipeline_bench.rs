//! Criterion benchmarks for the dashboard pipeline.
//!
//! Benchmarks:
//! 1. Series generation over each range preset
//! 2. Moving-average smoothing at several window lengths
//! 3. Full update (range → series → chart → summary)

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dashlab_core::{
    build_day_range_from, generate_series, moving_average, run_update, RangePreset,
    UpdateRequest, DEMO_SEED,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn bench_generate_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_series");
    for preset in RangePreset::ALL {
        let days = build_day_range_from(today(), i64::from(preset.months())).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(preset), &days, |b, days| {
            b.iter(|| generate_series(black_box(days), DEMO_SEED))
        });
    }
    group.finish();
}

fn bench_moving_average(c: &mut Criterion) {
    let days = build_day_range_from(today(), 12).unwrap();
    let series = generate_series(&days, DEMO_SEED);
    let mut group = c.benchmark_group("moving_average");
    for period in [7_usize, 30, 90] {
        group.bench_with_input(BenchmarkId::from_parameter(period), &period, |b, &period| {
            b.iter(|| moving_average(black_box(&series.visits), period))
        });
    }
    group.finish();
}

fn bench_full_update(c: &mut Criterion) {
    let request = UpdateRequest {
        range: RangePreset::Months12,
        ..UpdateRequest::default()
    };
    c.bench_function("run_update_12m", |b| {
        b.iter(|| run_update(today(), black_box(&request)))
    });
}

criterion_group!(
    benches,
    bench_generate_series,
    bench_moving_average,
    bench_full_update
);
criterion_main!(benches);
