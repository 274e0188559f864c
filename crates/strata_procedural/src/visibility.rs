//! # Face Visibility Extraction
//!
//! Emits one [`PackedFace`] per voxel face that borders empty or
//! transparent space. Solid interiors produce nothing.
//!
//! ## Predicate
//!
//! A face of a non-air voxel is visible iff its neighbour in that
//! direction is outside the chunk, air, or water. Bounds are checked
//! before any neighbour index is formed.
//!
//! ## Order
//!
//! Voxels are visited x-major, then z, then y; directions in
//! [`FaceDirection::ALL`] order. Per-material lists are therefore stable
//! for a given field.

use std::collections::BTreeMap;

use strata_shared::{FaceDirection, LocalPos, PackedFace, VoxelMaterial, MAX_CHUNK_SIZE};

use crate::error::{GenResult, GenerationError};
use crate::field::VoxelField;

/// Returns true if the `direction` face of the voxel at `pos` is visible.
///
/// The voxel's own material is not consulted.
#[inline]
#[must_use]
pub fn face_visible(field: &VoxelField, pos: LocalPos, direction: FaceDirection) -> bool {
    let [dx, dy, dz] = direction.offset();
    let edge = i32::from(field.edge());
    let nx = i32::from(pos.x) + dx;
    let ny = i32::from(pos.y) + dy;
    let nz = i32::from(pos.z) + dz;

    if !(0..edge).contains(&nx) || !(0..edge).contains(&ny) || !(0..edge).contains(&nz) {
        return true;
    }

    field
        .get(LocalPos::new(nx as u8, ny as u8, nz as u8))
        .map_or(true, VoxelMaterial::is_transparent)
}

/// Rejects edges the 4-bit face coordinates cannot address.
pub(crate) fn check_edge(edge: u8) -> GenResult<()> {
    if edge > MAX_CHUNK_SIZE {
        return Err(GenerationError::ChunkSizeOutOfRange {
            size: edge,
            max: MAX_CHUNK_SIZE,
        });
    }
    Ok(())
}

/// Visible faces of one chunk, grouped by the emitting voxel's material.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleFaces {
    by_material: BTreeMap<VoxelMaterial, Vec<PackedFace>>,
    total: usize,
}

impl VisibleFaces {
    /// Extracts visible faces from a field.
    ///
    /// # Errors
    ///
    /// Returns `ChunkSizeOutOfRange` if the field edge exceeds what the
    /// 4-bit face coordinates can address.
    pub fn extract(field: &VoxelField) -> GenResult<Self> {
        check_edge(field.edge())?;
        Ok(Self::scan(field))
    }

    /// Scan without the edge check. Callers hold a validated chunk size.
    pub(crate) fn scan(field: &VoxelField) -> Self {
        let mut faces = Self::default();
        let edge = field.edge();

        for x in 0..edge {
            for z in 0..edge {
                for y in 0..edge {
                    let pos = LocalPos::new(x, y, z);
                    let material = match field.get(pos) {
                        Some(material) if !material.is_air() => material,
                        _ => continue,
                    };

                    for direction in FaceDirection::ALL {
                        if face_visible(field, pos, direction) {
                            faces.push(PackedFace::for_voxel(x, y, z, material, direction), material);
                        }
                    }
                }
            }
        }
        faces
    }

    #[inline]
    fn push(&mut self, face: PackedFace, material: VoxelMaterial) {
        self.by_material.entry(material).or_default().push(face);
        self.total += 1;
    }

    /// Faces grouped by material, in material order.
    #[inline]
    #[must_use]
    pub fn by_material(&self) -> &BTreeMap<VoxelMaterial, Vec<PackedFace>> {
        &self.by_material
    }

    /// Faces of one material.
    #[must_use]
    pub fn faces_of(&self, material: VoxelMaterial) -> &[PackedFace] {
        self.by_material.get(&material).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total face count across materials.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns true if no face is visible.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates every face, grouped by material.
    pub fn iter(&self) -> impl Iterator<Item = PackedFace> + '_ {
        self.by_material.values().flatten().copied()
    }
}
