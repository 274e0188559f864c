//! # STRATA Region Generator
//!
//! Generates a cube of chunks around a centre coordinate and reports
//! face counts and compression.
//!
//! Usage:
//!   `strata_gen --seed 42 --radius 3 --center 0,4,0 --threads`
//!
//! Set `RUST_LOG=debug` to see every chunk as it is built.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use strata::cli::{GenOptions, USAGE};
use strata::procedural::{ChunkEntry, SharedWorldGenerator, WorldConfig, WorldGenerator};
use strata::report::RegionReport;
use strata::shared::{ChunkCoord, VoxelMaterial};

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = match GenOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    if options.help {
        println!("{USAGE}");
        return;
    }

    let config = match options.world_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let region = options.region();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                 STRATA REGION GENERATOR                          ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ CONFIGURATION ──────────────────────────────────────────────────┐");
    println!("│ Seed:          {}", config.seed);
    println!("│ Chunk size:    {} voxels ({} world units)", config.chunk_size, config.chunk_world_size());
    println!("│ Water level:   {}", config.water_level);
    println!("│ Region:        {} chunks around ({})", region.len(), options.center);
    println!("│ Mode:          {}", if options.parallel { "parallel" } else { "serial" });
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let start = Instant::now();
    let entries = match generate(&config, &region, options.parallel) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let report = RegionReport::collect(entries.iter().map(Arc::as_ref), config.chunk_volume(), start.elapsed());

    log::info!(
        "generated {} chunks in {:.2?}",
        report.chunks,
        report.elapsed
    );

    println!("┌─ FACES BY MATERIAL ──────────────────────────────────────────────┐");
    for (material, count) in faces_by_material(&entries) {
        println!("│ {:<16} {:>10}", format!("{material:?}"), count);
    }
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("{report}");
}

fn generate(
    config: &WorldConfig,
    region: &[ChunkCoord],
    parallel: bool,
) -> strata::procedural::GenResult<Vec<Arc<ChunkEntry>>> {
    if parallel {
        let world = SharedWorldGenerator::new(config.clone())?;
        Ok(world.generate_region(region))
    } else {
        let mut world = WorldGenerator::new(config.clone())?;
        Ok(region.iter().map(|&coord| world.get_or_create(coord)).collect())
    }
}

fn faces_by_material(entries: &[Arc<ChunkEntry>]) -> BTreeMap<VoxelMaterial, usize> {
    let mut totals = BTreeMap::new();
    for entry in entries {
        for (material, faces) in entry.faces_by_material() {
            *totals.entry(*material).or_default() += faces.len();
        }
    }
    totals
}
