//! # Biome Classification
//!
//! Maps a world position to a voxel material.
//!
//! Uses a layered-column model:
//! - Water level decides between the seabed and the land strata
//! - Terrain height decides between air and ground
//! - Moisture, temperature and chunk wackiness pick the land biome
//!
//! Each biome is a short list of strata. A voxel `d` units below the
//! surface takes the first stratum whose depth is at least `d`; anything
//! deeper is stone. Thresholds and depths are part of the world format.

use strata_shared::{VoxelMaterial, WorldPos};

use crate::climate::ClimateSource;

/// One layer of a column: `depth` units below the surface and up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stratum {
    /// Depth below the terrain surface this layer reaches.
    pub depth: f64,
    /// Layer material.
    pub material: VoxelMaterial,
}

impl Stratum {
    const fn new(depth: f64, material: VoxelMaterial) -> Self {
        Self { depth, material }
    }
}

/// Material below every listed stratum.
pub const BEDROCK: VoxelMaterial = VoxelMaterial::Stone;

/// Seabed column used below the water level.
pub const UNDERWATER_STRATA: [Stratum; 4] = [
    Stratum::new(0.0, VoxelMaterial::Water),
    Stratum::new(2.0, VoxelMaterial::Sand),
    Stratum::new(8.0, VoxelMaterial::Mud),
    Stratum::new(14.0, VoxelMaterial::Sandstone),
];

const DESERT_STRATA: [Stratum; 2] = [
    Stratum::new(3.0, VoxelMaterial::Sand),
    Stratum::new(7.0, VoxelMaterial::Sandstone),
];

const TUNDRA_STRATA: [Stratum; 2] = [
    Stratum::new(1.0, VoxelMaterial::Snow),
    Stratum::new(6.0, VoxelMaterial::PackedDirt),
];

const FUNGAL_STRATA: [Stratum; 2] = [
    Stratum::new(1.0, VoxelMaterial::Mycelium),
    Stratum::new(7.0, VoxelMaterial::Dirt),
];

const JUNGLE_STRATA: [Stratum; 3] = [
    Stratum::new(1.0, VoxelMaterial::Grass),
    Stratum::new(3.0, VoxelMaterial::FertileDirt),
    Stratum::new(7.0, VoxelMaterial::Dirt),
];

const TEMPERATE_STRATA: [Stratum; 2] = [
    Stratum::new(1.0, VoxelMaterial::Grass),
    Stratum::new(6.0, VoxelMaterial::Dirt),
];

/// Land biome types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Dry and hot.
    Desert,
    /// Dry and cold.
    Tundra,
    /// Humid, hot and wacky.
    Fungal,
    /// Humid.
    Jungle,
    /// Everything else.
    Temperate,
}

impl Biome {
    /// Selects a biome. First match wins.
    #[must_use]
    pub fn select(moisture: f64, temperature: f64, wackiness: f64) -> Self {
        if moisture <= 0.3 && temperature >= 0.7 {
            Self::Desert
        } else if moisture <= 0.4 && temperature <= 0.3 {
            Self::Tundra
        } else if moisture > 0.7 && wackiness != 0.0 {
            if wackiness > 0.7 && temperature > 0.7 {
                Self::Fungal
            } else {
                Self::Jungle
            }
        } else {
            Self::Temperate
        }
    }

    /// Strata from the surface down, in ascending depth.
    #[must_use]
    pub const fn strata(self) -> &'static [Stratum] {
        match self {
            Self::Desert => &DESERT_STRATA,
            Self::Tundra => &TUNDRA_STRATA,
            Self::Fungal => &FUNGAL_STRATA,
            Self::Jungle => &JUNGLE_STRATA,
            Self::Temperate => &TEMPERATE_STRATA,
        }
    }
}

/// Picks the first stratum reaching down to `y`.
#[inline]
fn layer(strata: &[Stratum], y: f64, terrain_height: f64) -> VoxelMaterial {
    strata
        .iter()
        .find(|stratum| y + stratum.depth >= terrain_height)
        .map_or(BEDROCK, |stratum| stratum.material)
}

/// Classifies world positions into materials.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeClassifier {
    water_level: f64,
}

impl BiomeClassifier {
    /// Creates a classifier for a given water level.
    #[must_use]
    pub const fn new(water_level: f64) -> Self {
        Self { water_level }
    }

    /// Returns the material at `pos`.
    ///
    /// Climate is only consulted for land voxels at or below the surface;
    /// air above the terrain never evaluates moisture or temperature.
    #[must_use]
    pub fn classify(
        &self,
        climate: &impl ClimateSource,
        terrain_height: f64,
        wackiness: f64,
        pos: WorldPos,
    ) -> VoxelMaterial {
        if pos.y < self.water_level {
            return layer(&UNDERWATER_STRATA, pos.y, terrain_height);
        }

        if pos.y > terrain_height {
            return VoxelMaterial::Air;
        }

        let biome = Biome::select(
            climate.moisture(pos.x, pos.z),
            climate.temperature(pos.z),
            wackiness,
        );
        layer(biome.strata(), pos.y, terrain_height)
    }
}
