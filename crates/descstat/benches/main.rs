// Use codspeed-criterion-compat when running on CodSpeed (CI), real criterion otherwise
#[cfg(codspeed)]
use codspeed_criterion_compat::{Criterion, black_box, criterion_group, criterion_main};
#[cfg(not(codspeed))]
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use descstat::{Decimal, Fraction, mean, median, mode, pvariance, stdev, variance};

const SIZE: usize = 1000;

/// Deterministic float data with a spread of values and some repeats.
fn float_data() -> Vec<f64> {
    (0..SIZE).map(|i| ((i * 7919) % 1013) as f64 / 8.0).collect()
}

fn fraction_data() -> Vec<Fraction> {
    (0..SIZE)
        .map(|i| Fraction::new(((i * 7919) % 1013) as i64, (i % 12 + 1) as i64).unwrap())
        .collect()
}

fn decimal_data() -> Vec<Decimal> {
    (0..SIZE)
        .map(|i| Decimal::new(((i * 7919) % 100_003) as i64, -2))
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let floats = float_data();
    c.bench_function("mean__f64", |b| b.iter(|| black_box(mean(black_box(&floats)).unwrap())));
    c.bench_function("median__f64", |b| b.iter(|| black_box(median(black_box(&floats)).unwrap())));
    c.bench_function("variance__f64", |b| {
        b.iter(|| black_box(variance(black_box(&floats), None).unwrap()));
    });
    c.bench_function("stdev__f64", |b| b.iter(|| black_box(stdev(black_box(&floats), None).unwrap())));

    let labels: Vec<usize> = (0..SIZE).map(|i| i % 17 + usize::from(i % 5 == 0)).collect();
    c.bench_function("mode__labels", |b| b.iter(|| black_box(mode(black_box(&labels)))));

    let fractions = fraction_data();
    c.bench_function("variance__fraction", |b| {
        b.iter(|| black_box(variance(black_box(&fractions), None).unwrap()));
    });

    let decimals = decimal_data();
    c.bench_function("pvariance__decimal", |b| {
        b.iter(|| black_box(pvariance(black_box(&decimals), None).unwrap()));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
