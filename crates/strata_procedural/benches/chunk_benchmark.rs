//! Benchmark for the chunk pipeline.
//!
//! Covers each stage (field generation, run-length encoding, face
//! extraction) and the cached and parallel entry points.
//!
//! Run with: cargo bench --package strata_procedural --bench chunk_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use strata_procedural::{
    ChunkEntry, EncodedField, SharedWorldGenerator, VisibleFaces, WorldConfig, WorldGenerator,
};
use strata_shared::ChunkCoord;

fn benchmark_stages(c: &mut Criterion) {
    let world = WorldGenerator::new(WorldConfig::with_seed(42)).unwrap();
    let coord = ChunkCoord::new(3, 4, -2);
    let field = world.generate_field(coord);

    let mut group = c.benchmark_group("stages");
    group.bench_function("generate_field", |b| {
        let mut x = 0i32;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(world.generate_field(ChunkCoord::new(x, 4, x / 2)))
        });
    });
    group.bench_function("rle_encode", |b| b.iter(|| black_box(EncodedField::encode(black_box(&field)))));
    group.bench_function("extract_faces", |b| {
        b.iter(|| black_box(VisibleFaces::extract(black_box(&field))))
    });
    group.bench_function("build_entry", |b| b.iter(|| black_box(ChunkEntry::from_field(black_box(&field)).unwrap())));
    group.finish();
}

fn benchmark_cached_lookup(c: &mut Criterion) {
    let mut world = WorldGenerator::new(WorldConfig::with_seed(42)).unwrap();
    let coord = ChunkCoord::new(0, 5, 0);
    let _ = world.get_or_create(coord);

    c.bench_function("cache_hit", |b| b.iter(|| black_box(world.get_or_create(black_box(coord)))));
}

fn benchmark_region(c: &mut Criterion) {
    let region = ChunkCoord::new(0, 5, 0).cube_around(3);

    let mut group = c.benchmark_group("region_7x7x7");
    group.throughput(Throughput::Elements(region.len() as u64));
    group.sample_size(10);

    group.bench_function("serial", |b| {
        b.iter(|| {
            let world = WorldGenerator::new(WorldConfig::with_seed(42)).unwrap();
            for coord in &region {
                black_box(world.build_entry(*coord));
            }
        });
    });

    group.bench_function("parallel", |b| {
        b.iter(|| {
            let world = SharedWorldGenerator::new(WorldConfig::with_seed(42)).unwrap();
            black_box(world.generate_region(&region))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_stages, benchmark_cached_lookup, benchmark_region);
criterion_main!(benches);
