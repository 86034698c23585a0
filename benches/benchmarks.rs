//! Benchmarks for numstats
//!
//! Run with: cargo bench --features full

// Require all families for benchmarks
#[cfg(not(all(feature = "quantiles", feature = "aggregate")))]
compile_error!("Benchmarks require all features. Run: cargo bench --features full");

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use numstats::aggregate::{DoubleStatistics, LongStatistics, Statistic};
use numstats::moments::{Kurtosis, LongVariance, Mean, Variance};
use numstats::quantiles::{EstimationMethod, Median, Quantile};
use numstats::statistics::{LongSum, Sum};
use numstats::traits::{Accumulator, StatisticResult};

fn doubles(n: usize) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(42);
    (0..n).map(|_| rng.gen_range(-1e6..1e6)).collect()
}

fn longs(n: usize) -> Vec<i64> {
    let mut rng = SmallRng::seed_from_u64(42);
    (0..n).map(|_| rng.gen()).collect()
}

// ============================================================================
// Streaming accumulators
// ============================================================================

fn bench_accept(c: &mut Criterion) {
    let mut group = c.benchmark_group("accept");
    group.throughput(Throughput::Elements(1));

    group.bench_function("sum", |b| {
        let mut s = Sum::new();
        let mut x = 0.5f64;
        b.iter(|| {
            s.accept(black_box(x));
            x += 1.0;
        });
    });

    group.bench_function("variance", |b| {
        let mut v = Variance::new();
        let mut x = 0.5f64;
        b.iter(|| {
            v.accept(black_box(x));
            x += 1.0;
        });
    });

    group.bench_function("kurtosis", |b| {
        let mut k = Kurtosis::new();
        let mut x = 0.5f64;
        b.iter(|| {
            k.accept(black_box(x));
            x += 1.0;
        });
    });

    group.bench_function("long_variance", |b| {
        let mut v = LongVariance::new();
        let mut i = 0i64;
        b.iter(|| {
            v.accept(black_box(i));
            i = i.wrapping_add(0x9E37_79B9_7F4A_7C15);
        });
    });

    group.finish();
}

// ============================================================================
// Array computation
// ============================================================================

fn bench_of(c: &mut Criterion) {
    let mut group = c.benchmark_group("of");
    let data = doubles(10_000);
    let ints = longs(10_000);
    group.throughput(Throughput::Elements(data.len() as u64));

    group.bench_function("mean", |b| b.iter(|| black_box(Mean::of(&data).as_f64())));
    group.bench_function("variance", |b| {
        b.iter(|| black_box(Variance::of(&data).as_f64()))
    });
    group.bench_function("kurtosis", |b| {
        b.iter(|| black_box(Kurtosis::of(&data).as_f64()))
    });
    group.bench_function("long_sum", |b| {
        b.iter(|| black_box(LongSum::of(&ints).as_f64()))
    });
    group.bench_function("long_variance", |b| {
        b.iter(|| black_box(LongVariance::of(&ints).as_f64()))
    });

    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");
    let data = doubles(20_000);
    let (left, right) = data.split_at(10_000);

    group.bench_function("kurtosis", |b| {
        let k1 = Kurtosis::of(left);
        let k2 = Kurtosis::of(right);
        b.iter(|| {
            let mut k = k1;
            k.combine(black_box(&k2));
            black_box(k)
        });
    });

    group.bench_function("aggregate", |b| {
        let builder = DoubleStatistics::builder(&Statistic::ALL).unwrap();
        let s1 = builder.build(left);
        let s2 = builder.build(right);
        b.iter(|| {
            let mut s = s1.clone();
            s.combine(black_box(&s2)).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Order statistics
// ============================================================================

fn bench_quantiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantiles");

    for n in [100usize, 10_000, 1_000_000] {
        let data = doubles(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("median", n), &data, |b, data| {
            let median = Median::with_defaults();
            let mut work = data.clone();
            b.iter(|| black_box(median.evaluate(&mut work).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("quartiles", n), &data, |b, data| {
            let q = Quantile::with_defaults().with_method(EstimationMethod::Hf7);
            let mut work = data.clone();
            b.iter(|| black_box(q.evaluate_many(&mut work, &[0.25, 0.5, 0.75]).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("median_in_place", n), &data, |b, data| {
            let median = Median::with_defaults().with_copy(false);
            b.iter_batched_ref(
                || data.clone(),
                |work| black_box(median.evaluate(work).unwrap()),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// Aggregators
// ============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(1));

    group.bench_function("accept_all_double", |b| {
        let mut s = DoubleStatistics::new(&Statistic::ALL).unwrap();
        let mut x = 0.5f64;
        b.iter(|| {
            s.accept(black_box(x));
            x += 1.0;
        });
    });

    group.bench_function("accept_variance_long", |b| {
        let mut s = LongStatistics::new(&[Statistic::Variance]).unwrap();
        let mut i = 0i64;
        b.iter(|| {
            s.accept(black_box(i));
            i = i.wrapping_add(0x9E37_79B9_7F4A_7C15);
        });
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(
    benches,
    bench_accept,
    bench_of,
    bench_combine,
    bench_quantiles,
    bench_aggregate,
);

criterion_main!(benches);
