//! # Concurrent Generation
//!
//! A generator that many threads can share. Each coordinate is generated
//! at most once: the first request reserves a slot under the map lock,
//! then fills it outside the lock. Concurrent requests for the same
//! coordinate wait on that slot; requests for other coordinates proceed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rayon::prelude::*;
use strata_shared::ChunkCoord;

use crate::cache::ChunkEntry;
use crate::config::WorldConfig;
use crate::error::GenResult;
use crate::noise::{NoiseField, NoiseSet, OctavedNoise};
use crate::world::build_entry;

type Slot = Arc<OnceLock<Arc<ChunkEntry>>>;

/// Thread-safe chunk generator with at-most-once generation per coordinate.
pub struct SharedWorldGenerator<N = OctavedNoise> {
    config: WorldConfig,
    noises: NoiseSet<N>,
    slots: Mutex<HashMap<ChunkCoord, Slot>>,
    generated: AtomicU64,
}

impl SharedWorldGenerator {
    /// Creates a shared generator with seed-derived noise channels.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn new(config: WorldConfig) -> GenResult<Self> {
        let noises = NoiseSet::from_config(&config);
        Self::with_noises(config, noises)
    }
}

impl<N: NoiseField + Sync> SharedWorldGenerator<N> {
    /// Creates a shared generator over injected noise channels.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn with_noises(config: WorldConfig, noises: NoiseSet<N>) -> GenResult<Self> {
        config.validate()?;
        tracing::info!(
            seed = config.seed,
            chunk_size = config.chunk_size,
            "shared world generator ready"
        );
        Ok(Self {
            config,
            noises,
            slots: Mutex::new(HashMap::new()),
            generated: AtomicU64::new(0),
        })
    }

    /// Returns the entry for `coord`, generating it at most once.
    pub fn get_or_create(&self, coord: ChunkCoord) -> Arc<ChunkEntry> {
        let slot = Arc::clone(self.slots.lock().entry(coord).or_default());

        let entry = slot.get_or_init(|| {
            self.generated.fetch_add(1, Ordering::Relaxed);
            Arc::new(build_entry(&self.noises, &self.config, coord))
        });
        Arc::clone(entry)
    }

    /// Generates a batch of chunks in parallel, preserving input order.
    pub fn generate_region(&self, coords: &[ChunkCoord]) -> Vec<Arc<ChunkEntry>> {
        coords
            .par_iter()
            .map(|&coord| self.get_or_create(coord))
            .collect()
    }

    /// Drops a chunk. Returns it if generation had finished.
    pub fn unload(&self, coord: ChunkCoord) -> Option<Arc<ChunkEntry>> {
        let slot = self.slots.lock().remove(&coord)?;
        let entry = slot.get().cloned();
        tracing::debug!(%coord, "chunk unloaded");
        entry
    }

    /// Number of chunks generated so far, including unloaded ones.
    #[must_use]
    pub fn generated_count(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    /// Number of reserved or filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Returns true if no chunk has been requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Generation parameters.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}
