//! Benchmark for noise channel throughput.
//!
//! A chunk of edge 8 costs 64 height samples, 64 moisture samples per
//! surface layer and one wackiness sample.
//!
//! Run with: cargo bench --package strata_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use strata_procedural::config::NoiseChannelSettings;
use strata_procedural::noise::{MemoizedNoise, NoiseField, OctavedNoise, SimplexNoise, WorldSeed};

fn benchmark_simplex_sample(c: &mut Criterion) {
    let noise = SimplexNoise::new(WorldSeed::new(42));

    c.bench_function("simplex_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_octaved_channels(c: &mut Criterion) {
    let height = OctavedNoise::new(WorldSeed::new(42).derive(1), NoiseChannelSettings::new(1.2, 400.0, 3));
    let wackiness = OctavedNoise::new(WorldSeed::new(42).derive(3), NoiseChannelSettings::new(1.0, 20.0, 10));

    let mut group = c.benchmark_group("octaved_channels");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("height_3_octaves_64x64", |b| {
        b.iter(|| {
            for i in 0..4096 {
                let x = f64::from(i % 64);
                let z = f64::from(i / 64);
                black_box(height.eval(x, z, 3));
            }
        });
    });

    group.bench_function("wackiness_10_octaves_64x64", |b| {
        b.iter(|| {
            for i in 0..4096 {
                let x = f64::from(i % 64) / 100.0;
                let z = f64::from(i / 64) / 100.0;
                black_box(wackiness.eval(x, z, 10));
            }
        });
    });

    group.finish();
}

fn benchmark_memoized_repeat(c: &mut Criterion) {
    let memo = MemoizedNoise::new(
        OctavedNoise::new(WorldSeed::new(42), NoiseChannelSettings::new(1.0, 200.0, 3)),
        8192,
    );

    let mut group = c.benchmark_group("memoized");
    group.throughput(Throughput::Elements(4096));
    group.bench_function("repeat_64x64", |b| {
        b.iter(|| {
            for i in 0..4096 {
                black_box(memo.eval(f64::from(i % 64), f64::from(i / 64), 3));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_simplex_sample,
    benchmark_octaved_channels,
    benchmark_memoized_repeat
);
criterion_main!(benches);
