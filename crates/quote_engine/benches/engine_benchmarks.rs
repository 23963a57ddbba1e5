//! Criterion benchmarks for quote_engine.
//!
//! Measures a full quotation recompute across roster sizes, which is the
//! operation run on every parameter or roster change.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quote_core::{ParameterSet, Position, SelectionList};
use quote_engine::{calculate_quotation, schedule_of_rates};

/// Generate a roster of `n` lines with varied salaries and tool costs.
fn generate_roster(n: usize) -> SelectionList {
    let mut roster = SelectionList::new();
    for i in 0..n {
        let tool = if i % 3 == 0 { Some(250.0 * (i % 7) as f64) } else { None };
        roster.add(Position::new(format!("Position {i}"), 2000.0 + 150.0 * i as f64, tool), 1 + (i % 5) as u32);
    }
    roster
}

/// Benchmark the full recompute.
fn bench_calculate_quotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_quotation");
    let params = ParameterSet::default();

    for size in [1, 10, 50, 200] {
        let roster = generate_roster(size);
        group.bench_with_input(BenchmarkId::new("roster", size), &roster, |b, roster| {
            b.iter(|| calculate_quotation(black_box(&params), black_box(roster.as_slice())));
        });
    }

    group.finish();
}

/// Benchmark the proposal schedule of rates.
fn bench_schedule_of_rates(c: &mut Criterion) {
    let params = ParameterSet::default();
    let roster = generate_roster(50);

    c.bench_function("schedule_of_rates_50", |b| {
        b.iter(|| schedule_of_rates(black_box(&params), black_box(roster.as_slice())));
    });
}

criterion_group!(benches, bench_calculate_quotation, bench_schedule_of_rates);
criterion_main!(benches);
