//! Precision arithmetic benchmarks.
//!
//! Order construction runs these on every call (cost = amount * price,
//! then rendering at market precision), so they sit on the hot path of
//! request building.
//!
//! Run with: cargo bench --bench precise_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use std::str::FromStr;

use uniex_core::precise::Precise;
use uniex_core::precision::{
    decimal_to_precision, number_to_string, precision_from_string, PaddingMode, RoundingMode,
};

// ==================== Exact string arithmetic ====================

fn bench_string_add(c: &mut Criterion) {
    c.bench_function("precise_string_add", |b| {
        b.iter(|| Precise::string_add(black_box("0.00000001"), black_box("123456.789")));
    });
}

fn bench_string_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("precise_string_mul");
    for (name, a, bb) in [
        ("small", "0.001", "50000"),
        ("fractional", "0.123456789", "49999.99999999"),
        ("large", "123456789.123456789", "987654321.987654321"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(a, bb), |b, (a, bb)| {
            b.iter(|| Precise::string_mul(black_box(a), black_box(bb)));
        });
    }
    group.finish();
}

fn bench_string_div(c: &mut Criterion) {
    c.bench_function("precise_string_div", |b| {
        b.iter(|| Precise::string_div(black_box("1"), black_box("3")));
    });
}

// ==================== Decimal rendering ====================

fn bench_decimal_to_precision(c: &mut Criterion) {
    let value = Decimal::from_str("50000.123456789").unwrap();

    let mut group = c.benchmark_group("decimal_to_precision");
    for digits in [0, 2, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(digits),
            &digits,
            |b, &digits| {
                b.iter(|| {
                    decimal_to_precision(
                        black_box(value),
                        RoundingMode::RoundDown,
                        digits,
                        PaddingMode::PadWithZero,
                    )
                });
            },
        );
    }
    group.finish();
}

fn bench_number_to_string(c: &mut Criterion) {
    let value = Decimal::from_str("500.00000000").unwrap();
    c.bench_function("number_to_string_trims_zeros", |b| {
        b.iter(|| number_to_string(black_box(value)));
    });
}

fn bench_precision_from_string(c: &mut Criterion) {
    c.bench_function("precision_from_string", |b| {
        b.iter(|| precision_from_string(black_box("0.00010000")));
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(100);
    targets =
        bench_string_add,
        bench_string_mul,
        bench_string_div,
        bench_decimal_to_precision,
        bench_number_to_string,
        bench_precision_from_string,
);

criterion_main!(benches);
