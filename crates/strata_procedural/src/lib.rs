//! # STRATA Procedural Generation
//!
//! Deterministic voxel world generation, compressed and visibility-culled.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and coordinate always give the same bytes
//! 2. **Chunked**: The world is generated in independent cubic chunks
//! 3. **Lean**: Dense fields are transient; only runs and faces are kept
//! 4. **Pluggable**: Noise and cache retention sit behind traits
//!
//! ## Core Components
//!
//! - `NoiseField` / `OctavedNoise`: seeded 2D noise channels in [0, 1]
//! - `BiomeClassifier`: layered strata per column
//! - `FieldGenerator`: dense per-chunk material grid
//! - `EncodedField`: run-length codec
//! - `VisibleFaces`: bit-packed faces bordering air or water
//! - `ChunkCache`: memoized entries with an `EvictionPolicy`
//! - `WorldGenerator` / `SharedWorldGenerator`: the pipeline façades
//!
//! ## Example
//!
//! ```rust
//! use strata_procedural::{WorldConfig, WorldGenerator};
//! use strata_shared::ChunkCoord;
//!
//! let mut world = WorldGenerator::new(WorldConfig::with_seed(42)).unwrap();
//! let entry = world.get_or_create(ChunkCoord::new(0, 0, 0));
//!
//! // Same coordinate, same entry
//! let again = world.get_or_create(ChunkCoord::new(0, 0, 0));
//! assert_eq!(entry.face_count(), again.face_count());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod cache;
pub mod climate;
pub mod config;
pub mod error;
pub mod field;
pub mod noise;
pub mod rle;
pub mod shared;
pub mod visibility;
pub mod world;

pub use biome::{Biome, BiomeClassifier, Stratum};
pub use cache::{CacheStats, ChunkCache, ChunkEntry, DistancePolicy, EvictionPolicy, LruPolicy, RetainAll};
pub use climate::{Climate, ClimateSource, TemperatureModel};
pub use config::{NoiseChannelSettings, NoiseSettings, WorldConfig};
pub use error::{GenResult, GenerationError};
pub use field::{height_exponent, FieldGenerator, VoxelField};
pub use noise::{MemoizedNoise, NoiseChannel, NoiseField, NoiseSet, OctavedNoise, SimplexNoise, WorldSeed};
pub use rle::{EncodedField, Run};
pub use shared::SharedWorldGenerator;
pub use visibility::{face_visible, VisibleFaces};
pub use world::WorldGenerator;
