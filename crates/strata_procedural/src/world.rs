//! # World Generator
//!
//! Single-threaded entry point: chunk coordinate in, cached
//! [`ChunkEntry`] out.
//!
//! ## Pipeline
//!
//! ```text
//! ChunkCoord -> FieldGenerator -> VoxelField -> EncodedField  \
//!                                            -> VisibleFaces  -> ChunkEntry
//! ```
//!
//! The dense field is dropped after the entry is built.

use std::sync::Arc;

use strata_shared::ChunkCoord;

use crate::cache::{CacheStats, ChunkCache, ChunkEntry, EvictionPolicy, RetainAll};
use crate::config::WorldConfig;
use crate::error::GenResult;
use crate::field::{FieldGenerator, VoxelField};
use crate::noise::{NoiseField, NoiseSet, OctavedNoise};

/// Generates and caches one chunk. Shared by both generator flavours.
pub(crate) fn build_entry<N: NoiseField>(
    noises: &NoiseSet<N>,
    config: &WorldConfig,
    coord: ChunkCoord,
) -> ChunkEntry {
    let field = FieldGenerator::new(noises, config).generate(coord);
    let entry = ChunkEntry::from_validated_field(&field);
    tracing::debug!(
        %coord,
        runs = entry.encoded.run_count(),
        faces = entry.face_count(),
        empty = entry.is_empty,
        "chunk generated"
    );
    entry
}

/// Deterministic chunk generator with a chunk cache.
pub struct WorldGenerator<N = OctavedNoise, P = RetainAll> {
    config: WorldConfig,
    noises: NoiseSet<N>,
    cache: ChunkCache<P>,
}

impl WorldGenerator {
    /// Creates a generator with seed-derived noise channels.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn new(config: WorldConfig) -> GenResult<Self> {
        let noises = NoiseSet::from_config(&config);
        Self::with_noises(config, noises)
    }
}

impl<N: NoiseField> WorldGenerator<N, RetainAll> {
    /// Creates a generator over injected noise channels.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn with_noises(config: WorldConfig, noises: NoiseSet<N>) -> GenResult<Self> {
        config.validate()?;
        tracing::info!(
            seed = config.seed,
            chunk_size = config.chunk_size,
            voxel_size = config.voxel_size,
            "world generator ready"
        );
        Ok(Self {
            config,
            noises,
            cache: ChunkCache::new(RetainAll),
        })
    }
}

impl<N: NoiseField, P: EvictionPolicy> WorldGenerator<N, P> {
    /// Swaps the retention policy. Resident entries are dropped.
    #[must_use]
    pub fn with_policy<Q: EvictionPolicy>(self, policy: Q) -> WorldGenerator<N, Q> {
        WorldGenerator {
            config: self.config,
            noises: self.noises,
            cache: ChunkCache::new(policy),
        }
    }

    /// Returns the entry for `coord`, generating it on first request.
    pub fn get_or_create(&mut self, coord: ChunkCoord) -> Arc<ChunkEntry> {
        let Self {
            config,
            noises,
            cache,
        } = self;
        cache.get_or_insert_with(coord, || build_entry(noises, config, coord))
    }

    /// Builds an entry without touching the cache.
    #[must_use]
    pub fn build_entry(&self, coord: ChunkCoord) -> ChunkEntry {
        build_entry(&self.noises, &self.config, coord)
    }

    /// Generates the dense field of a chunk.
    #[must_use]
    pub fn generate_field(&self, coord: ChunkCoord) -> VoxelField {
        FieldGenerator::new(&self.noises, &self.config).generate(coord)
    }

    /// Reconstructs the dense field of an entry.
    ///
    /// # Errors
    ///
    /// Returns `DecodeLengthMismatch` if the entry was not produced with
    /// this generator's chunk size.
    pub fn decode(&self, entry: &ChunkEntry) -> GenResult<VoxelField> {
        entry.encoded.decode_field(self.config.chunk_size)
    }

    /// Drops a cached chunk.
    pub fn unload(&mut self, coord: ChunkCoord) -> Option<Arc<ChunkEntry>> {
        self.cache.unload(coord)
    }

    /// Mutates the retention policy and applies it.
    pub fn update_policy(&mut self, update: impl FnOnce(&mut P)) {
        self.cache.update_policy(update);
    }

    /// Cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Read-only view of the cache.
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &ChunkCache<P> {
        &self.cache
    }

    /// Generation parameters.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use strata_shared::VoxelMaterial;

    use super::*;
    use crate::cache::{DistancePolicy, LruPolicy};
    use crate::error::GenerationError;

    fn generator() -> WorldGenerator {
        WorldGenerator::new(WorldConfig::with_seed(42)).unwrap()
    }

    #[test]
    fn test_rejects_oversized_chunks() {
        let mut config = WorldConfig::with_seed(42);
        config.chunk_size = 32;
        assert!(matches!(
            WorldGenerator::new(config),
            Err(GenerationError::ChunkSizeOutOfRange { size: 32, max: 16 })
        ));
    }

    #[test]
    fn test_get_or_create_caches() {
        let mut world = generator();
        let coord = ChunkCoord::new(0, 0, 0);

        let first = world.get_or_create(coord);
        let second = world.get_or_create(coord);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(world.stats().misses, 1);
        assert_eq!(world.stats().hits, 1);
    }

    #[test]
    fn test_entry_matches_uncached_pipeline() {
        let mut world = generator();
        let coord = ChunkCoord::new(3, 0, -7);
        let cached = world.get_or_create(coord);
        assert_eq!(*cached, world.build_entry(coord));
        assert_eq!(world.decode(&cached).unwrap(), world.generate_field(coord));
    }

    #[test]
    fn test_high_chunks_are_empty() {
        // Terrain never exceeds max_elevation = 255
        let mut world = generator();
        let entry = world.get_or_create(ChunkCoord::new(0, 40, 0));
        assert!(entry.is_empty);
        assert_eq!(entry.face_count(), 0);
        assert_eq!(entry.encoded.runs().len(), 1);
        assert_eq!(entry.encoded.runs()[0].material, VoxelMaterial::Air);
        assert_eq!(usize::from(entry.encoded.runs()[0].count), 512);
    }

    #[test]
    fn test_policy_swap_and_unload() {
        let mut world = generator().with_policy(LruPolicy::new(2));
        for x in 0..4 {
            let _ = world.get_or_create(ChunkCoord::new(x, 0, 0));
        }
        assert_eq!(world.stats().resident, 2);
        assert_eq!(world.stats().evictions, 2);

        assert!(world.unload(ChunkCoord::new(3, 0, 0)).is_some());
        assert_eq!(world.stats().resident, 1);
    }

    #[test]
    fn test_distance_policy_recenter() {
        let mut world = generator().with_policy(DistancePolicy::new(ChunkCoord::default(), 1));
        for coord in ChunkCoord::default().cube_around(1) {
            let _ = world.get_or_create(coord);
        }
        world.update_policy(|policy| policy.set_center(ChunkCoord::new(0, 0, 5)));
        assert!(world.cache().is_empty());
    }

    #[test]
    fn test_injected_noises() {
        let flat = |_: f64, _: f64, _: u32| 0.0;
        let noises = NoiseSet {
            height: flat,
            moisture: flat,
            wackiness: flat,
        };
        let mut world = WorldGenerator::with_noises(WorldConfig::with_seed(1), noises).unwrap();

        // Height 0 with water level 40: the first chunk row is all water
        let entry = world.get_or_create(ChunkCoord::new(0, 0, 0));
        assert_eq!(entry.encoded.run_count(), 1);
        assert_eq!(entry.encoded.runs()[0].material, VoxelMaterial::Water);
        assert!(!entry.is_empty);
        // Water against the chunk boundary still shows faces
        assert_eq!(entry.face_count(), 512 * 6);
    }
}
