//! # Chunk Addressing
//!
//! Three coordinate spaces:
//! - chunk space: integer chunk indices ([`ChunkCoord`])
//! - local space: voxel indices inside one chunk ([`LocalPos`])
//! - world space: real-valued positions ([`WorldPos`])
//!
//! `world = chunk * chunk_world_size + local * voxel_size`, where
//! `chunk_world_size = chunk_size * voxel_size`.

use core::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Chunk coordinate in chunk space (not voxels, not world units).
///
/// Used directly as the cache key: equality and hashing cover all three
/// components, so distinct chunks never collide.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    /// X index.
    pub x: i32,
    /// Y index.
    pub y: i32,
    /// Z index.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// World position of the chunk's minimum corner.
    #[inline]
    #[must_use]
    pub fn origin(self, chunk_world_size: f64) -> WorldPos {
        WorldPos::new(
            f64::from(self.x) * chunk_world_size,
            f64::from(self.y) * chunk_world_size,
            f64::from(self.z) * chunk_world_size,
        )
    }

    /// World position of a voxel inside this chunk.
    #[inline]
    #[must_use]
    pub fn world_pos(self, local: LocalPos, chunk_size: u8, voxel_size: f64) -> WorldPos {
        let chunk_world_size = f64::from(chunk_size) * voxel_size;
        let origin = self.origin(chunk_world_size);
        WorldPos::new(
            origin.x + f64::from(local.x) * voxel_size,
            origin.y + f64::from(local.y) * voxel_size,
            origin.z + f64::from(local.z) * voxel_size,
        )
    }

    /// Chebyshev (max-axis) distance in chunks.
    #[inline]
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    /// Offsets this coordinate by whole chunks.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// All chunks within `radius` (Chebyshev) of this one, x-major order.
    #[must_use]
    pub fn cube_around(self, radius: i32) -> Vec<Self> {
        let side = (2 * radius.max(0) + 1) as usize;
        let mut coords = Vec::with_capacity(side * side * side);
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                for dy in -radius..=radius {
                    coords.push(self.offset(dx, dy, dz));
                }
            }
        }
        coords
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for ChunkCoord {
    #[inline]
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Voxel position inside a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// Local X.
    pub x: u8,
    /// Local Y.
    pub y: u8,
    /// Local Z.
    pub z: u8,
}

impl LocalPos {
    /// Creates a new local position.
    #[inline]
    #[must_use]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Linear index `x + y*N + z*N^2` for a chunk of edge `N`.
    #[inline]
    #[must_use]
    pub const fn index(self, edge: usize) -> usize {
        self.x as usize + self.y as usize * edge + self.z as usize * edge * edge
    }

    /// Inverse of [`LocalPos::index`].
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize, edge: usize) -> Self {
        Self {
            x: (index % edge) as u8,
            y: ((index / edge) % edge) as u8,
            z: (index / (edge * edge)) as u8,
        }
    }
}

/// Real-valued position in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    /// World X.
    pub x: f64,
    /// World Y (elevation).
    pub y: f64,
    /// World Z.
    pub z: f64,
}

impl WorldPos {
    /// Creates a new world position.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
