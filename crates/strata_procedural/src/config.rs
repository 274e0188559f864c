//! # World Configuration
//!
//! Immutable generation parameters, set once when a generator is built.
//!
//! ## TOML Format
//!
//! ```toml
//! seed = 42
//! equator_temp = 1.0
//! temp_decay_coeff = 0.1
//! max_elevation = 255.0
//! world_size = 1000.0
//! water_level = 40.0
//! chunk_size = 8
//! voxel_size = 1.0
//!
//! [noise.height]
//! amplitude = 1.2
//! wavelength = 400.0
//! octaves = 3
//! ```
//!
//! `seed` is required. Every other top-level key and every `[noise.*]`
//! table is optional; missing entries take the default values. A channel
//! table, once present, must be complete.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_shared::MAX_CHUNK_SIZE;

use crate::error::{GenResult, GenerationError};
use crate::noise::{NoiseChannel, WorldSeed};

/// Parameters of one octaved noise channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseChannelSettings {
    /// Base amplitude. Only relative amplitudes matter after normalization,
    /// but the value is kept so channels stay comparable.
    pub amplitude: f64,
    /// World units per base-octave period.
    pub wavelength: f64,
    /// Octaves used when the caller does not ask for a specific count.
    pub octaves: u32,
}

impl NoiseChannelSettings {
    /// Creates channel settings.
    #[must_use]
    pub const fn new(amplitude: f64, wavelength: f64, octaves: u32) -> Self {
        Self {
            amplitude,
            wavelength,
            octaves,
        }
    }

    fn validate(&self, channel: &'static str) -> GenResult<()> {
        if !(self.wavelength.is_finite() && self.wavelength > 0.0) {
            return Err(GenerationError::InvalidNoiseChannel {
                channel,
                reason: "wavelength must be positive and finite",
            });
        }
        if !(self.amplitude.is_finite() && self.amplitude > 0.0) {
            return Err(GenerationError::InvalidNoiseChannel {
                channel,
                reason: "amplitude must be positive and finite",
            });
        }
        if self.octaves == 0 {
            return Err(GenerationError::InvalidNoiseChannel {
                channel,
                reason: "at least one octave is required",
            });
        }
        Ok(())
    }
}

/// Noise channel parameters for every seed-derived field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Terrain height field.
    pub height: NoiseChannelSettings,
    /// Moisture field (biome selection).
    pub moisture: NoiseChannelSettings,
    /// Per-chunk roughness field.
    pub wackiness: NoiseChannelSettings,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            height: NoiseChannelSettings::new(1.2, 400.0, 3),
            moisture: NoiseChannelSettings::new(1.0, 200.0, 3),
            wackiness: NoiseChannelSettings::new(1.0, 20.0, 10),
        }
    }
}

/// World generation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Root seed. Every noise channel derives from it.
    pub seed: u64,
    /// Temperature at the equator (0..1).
    #[serde(default = "defaults::equator_temp")]
    pub equator_temp: f64,
    /// Temperature lost per world unit away from the equator.
    #[serde(default = "defaults::temp_decay_coeff")]
    pub temp_decay_coeff: f64,
    /// Terrain height at a normalized height sample of 1.0.
    #[serde(default = "defaults::max_elevation")]
    pub max_elevation: f64,
    /// World extent along Z; the equator sits at `world_size / 2`.
    #[serde(default = "defaults::world_size")]
    pub world_size: f64,
    /// Elevation below which columns fill with water.
    #[serde(default = "defaults::water_level")]
    pub water_level: f64,
    /// Chunk edge length in voxels (1..=16).
    #[serde(default = "defaults::chunk_size")]
    pub chunk_size: u8,
    /// Voxel edge length in world units.
    #[serde(default = "defaults::voxel_size")]
    pub voxel_size: f64,
    /// Noise channel parameters.
    #[serde(default)]
    pub noise: NoiseSettings,
}

mod defaults {
    use strata_shared::{DEFAULT_CHUNK_SIZE, DEFAULT_VOXEL_SIZE};

    pub(super) const fn equator_temp() -> f64 {
        1.0
    }

    pub(super) const fn temp_decay_coeff() -> f64 {
        0.1
    }

    pub(super) const fn max_elevation() -> f64 {
        255.0
    }

    pub(super) const fn world_size() -> f64 {
        1000.0
    }

    pub(super) const fn water_level() -> f64 {
        40.0
    }

    pub(super) const fn chunk_size() -> u8 {
        DEFAULT_CHUNK_SIZE
    }

    pub(super) const fn voxel_size() -> f64 {
        DEFAULT_VOXEL_SIZE
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: WorldSeed::default().value(),
            equator_temp: defaults::equator_temp(),
            temp_decay_coeff: defaults::temp_decay_coeff(),
            max_elevation: defaults::max_elevation(),
            world_size: defaults::world_size(),
            water_level: defaults::water_level(),
            chunk_size: defaults::chunk_size(),
            voxel_size: defaults::voxel_size(),
            noise: NoiseSettings::default(),
        }
    }
}

impl WorldConfig {
    /// Default configuration with the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parses a TOML document. Does not validate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document is not valid TOML or has
    /// mistyped keys.
    pub fn from_toml_str(source: &str) -> GenResult<Self> {
        toml::from_str(source).map_err(|e| GenerationError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML file. Does not validate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| GenerationError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> GenResult<String> {
        toml::to_string(self).map_err(|e| GenerationError::InvalidConfig(e.to_string()))
    }

    /// Rejects configurations the generator cannot represent.
    ///
    /// Terrain-shape oddities (`water_level > max_elevation`,
    /// `world_size <= 0`) are degenerate but legal and pass.
    ///
    /// # Errors
    ///
    /// - `ChunkSizeOutOfRange` if `chunk_size` is 0 or exceeds 16
    /// - `InvalidVoxelSize` if `voxel_size` is not positive and finite
    /// - `InvalidNoiseChannel` for unusable noise parameters
    pub fn validate(&self) -> GenResult<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(GenerationError::ChunkSizeOutOfRange {
                size: self.chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        if !(self.voxel_size.is_finite() && self.voxel_size > 0.0) {
            return Err(GenerationError::InvalidVoxelSize(self.voxel_size));
        }
        self.noise.height.validate(NoiseChannel::Height.name())?;
        self.noise.moisture.validate(NoiseChannel::Moisture.name())?;
        self.noise.wackiness.validate(NoiseChannel::Wackiness.name())?;
        Ok(())
    }

    /// Edge length of a chunk in world units.
    #[inline]
    #[must_use]
    pub fn chunk_world_size(&self) -> f64 {
        f64::from(self.chunk_size) * self.voxel_size
    }

    /// Voxels per chunk (`chunk_size^3`).
    #[inline]
    #[must_use]
    pub fn chunk_volume(&self) -> usize {
        let n = usize::from(self.chunk_size);
        n * n * n
    }

    /// Root seed as a [`WorldSeed`].
    #[inline]
    #[must_use]
    pub const fn world_seed(&self) -> WorldSeed {
        WorldSeed::new(self.seed)
    }
}
