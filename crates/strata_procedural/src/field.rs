//! # Voxel Field Generation
//!
//! Dense per-chunk material grids.
//!
//! ## Layout
//!
//! One [`VoxelMaterial`] per cell, linear index `x + y*N + z*N^2`.
//! A field is produced once per chunk, fed to the run-length codec and the
//! face extractor, then dropped.
//!
//! ## Cost
//!
//! Wackiness is sampled once per chunk and terrain height once per (x, z)
//! column, so noise cost is O(N^2) while classification is O(N^3).

use strata_shared::{ChunkCoord, LocalPos, VoxelMaterial};

use crate::biome::BiomeClassifier;
use crate::climate::{Climate, TemperatureModel};
use crate::config::WorldConfig;
use crate::error::{GenResult, GenerationError};
use crate::noise::{NoiseField, NoiseSet};

/// Dense N x N x N material grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelField {
    edge: u8,
    cells: Vec<VoxelMaterial>,
}

impl VoxelField {
    /// Creates an all-air field.
    #[must_use]
    pub fn new(edge: u8) -> Self {
        let n = usize::from(edge);
        Self {
            edge,
            cells: vec![VoxelMaterial::Air; n * n * n],
        }
    }

    /// Creates a field filled with one material.
    #[must_use]
    pub fn filled(edge: u8, material: VoxelMaterial) -> Self {
        let mut field = Self::new(edge);
        field.cells.fill(material);
        field
    }

    /// Wraps a linear cell buffer.
    ///
    /// # Errors
    ///
    /// Returns `DecodeLengthMismatch` if `cells.len() != edge^3`.
    pub fn from_cells(edge: u8, cells: Vec<VoxelMaterial>) -> GenResult<Self> {
        let n = usize::from(edge);
        let expected = n * n * n;
        if cells.len() != expected {
            return Err(GenerationError::DecodeLengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { edge, cells })
    }

    /// Edge length in voxels.
    #[inline]
    #[must_use]
    pub const fn edge(&self) -> u8 {
        self.edge
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> usize {
        self.cells.len()
    }

    /// Cells in index order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[VoxelMaterial] {
        &self.cells
    }

    /// Returns true if `pos` lies inside the chunk.
    #[inline]
    #[must_use]
    pub const fn contains(&self, pos: LocalPos) -> bool {
        pos.x < self.edge && pos.y < self.edge && pos.z < self.edge
    }

    /// Material at `pos`, or `None` outside the chunk.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: LocalPos) -> Option<VoxelMaterial> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get(pos.index(usize::from(self.edge))).copied()
    }

    /// Sets the material at `pos`.
    ///
    /// Returns false, leaving the field untouched, if `pos` lies outside
    /// the chunk.
    #[inline]
    #[must_use = "an out-of-chunk write is rejected, not clamped"]
    pub fn set(&mut self, pos: LocalPos, material: VoxelMaterial) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let index = pos.index(usize::from(self.edge));
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = material;
                true
            }
            None => false,
        }
    }

    /// Returns true if every cell is air.
    #[must_use]
    pub fn is_all_air(&self) -> bool {
        self.cells.iter().all(|m| m.is_air())
    }

    /// Iterates `(position, material)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (LocalPos, VoxelMaterial)> + '_ {
        let edge = usize::from(self.edge);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &m)| (LocalPos::from_index(i, edge), m))
    }
}

/// Maps chunk wackiness to the height-curve exponent.
///
/// Low wackiness flattens terrain (large exponents), very high wackiness
/// exaggerates it.
#[inline]
#[must_use]
pub fn height_exponent(wackiness: f64) -> f64 {
    if wackiness < 0.2 {
        16.0
    } else if wackiness < 0.4 {
        8.0
    } else if wackiness < 0.6 {
        2.0
    } else if wackiness > 0.8 {
        0.5
    } else {
        wackiness
    }
}

/// Fills chunk fields from a noise set.
pub struct FieldGenerator<'a, N> {
    noises: &'a NoiseSet<N>,
    config: &'a WorldConfig,
    classifier: BiomeClassifier,
    temperature: TemperatureModel,
}

impl<'a, N: NoiseField> FieldGenerator<'a, N> {
    /// Creates a generator over borrowed noises and configuration.
    #[must_use]
    pub fn new(noises: &'a NoiseSet<N>, config: &'a WorldConfig) -> Self {
        Self {
            noises,
            config,
            classifier: BiomeClassifier::new(config.water_level),
            temperature: TemperatureModel::from_config(config),
        }
    }

    /// Per-chunk roughness in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn chunk_wackiness(&self, coord: ChunkCoord) -> f64 {
        self.noises.wackiness.eval(
            f64::from(coord.x) / 100.0,
            f64::from(coord.z) / 100.0,
            self.config.noise.wackiness.octaves,
        )
    }

    /// Terrain height of the column at world `(x, z)`.
    #[inline]
    #[must_use]
    pub fn terrain_height(&self, x: f64, z: f64, exponent: f64) -> f64 {
        let raw = self
            .noises
            .height
            .eval(x, z, self.config.noise.height.octaves);
        raw.powf(exponent) * self.config.max_elevation
    }

    /// Generates the dense field of one chunk.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> VoxelField {
        let edge = self.config.chunk_size;
        let voxel_size = self.config.voxel_size;
        let wackiness = self.chunk_wackiness(coord);
        let exponent = height_exponent(wackiness);
        let climate = Climate::new(
            &self.noises.moisture,
            self.config.noise.moisture.octaves,
            self.temperature,
        );

        let mut field = VoxelField::new(edge);
        for x in 0..edge {
            for z in 0..edge {
                let column = coord.world_pos(LocalPos::new(x, 0, z), edge, voxel_size);
                let height = self.terrain_height(column.x, column.z, exponent);

                for y in 0..edge {
                    let local = LocalPos::new(x, y, z);
                    let pos = coord.world_pos(local, edge, voxel_size);
                    let material = self.classifier.classify(&climate, height, wackiness, pos);
                    let written = field.set(local, material);
                    debug_assert!(written, "{local:?} outside a {edge}-voxel chunk");
                }
            }
        }
        field
    }
}
