//! # Face Directions and Packed Face Descriptors
//!
//! A visible voxel face travels to the mesh builder as one `u32`:
//!
//! ```text
//! bit  23..20  19..16  15..12  11..4     3   2..0
//!      x       y       z       material  -   direction
//! ```
//!
//! ## Direction Order Contract
//!
//! Direction indices are a stable, downstream-visible contract. Face
//! orientation logic in the mesh builder depends on this exact order:
//!
//! | index | direction | offset      |
//! |-------|-----------|-------------|
//! | 0     | top       | (0, +1, 0)  |
//! | 1     | bottom    | (0, -1, 0)  |
//! | 2     | right     | (+1, 0, 0)  |
//! | 3     | left      | (-1, 0, 0)  |
//! | 4     | front     | (0, 0, +1)  |
//! | 5     | back      | (0, 0, -1)  |

use bytemuck::{Pod, Zeroable};

use crate::constants::{
    FACE_COUNT, PACK_AXIS_MASK, PACK_DIRECTION_MASK, PACK_MATERIAL_MASK, PACK_MATERIAL_SHIFT,
    PACK_X_SHIFT, PACK_Y_SHIFT, PACK_Z_SHIFT,
};
use crate::material::VoxelMaterial;

/// One of the six axis-aligned voxel faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FaceDirection {
    /// +Y
    Top = 0,
    /// -Y
    Bottom = 1,
    /// +X
    Right = 2,
    /// -X
    Left = 3,
    /// +Z
    Front = 4,
    /// -Z
    Back = 5,
}

impl FaceDirection {
    /// All directions in contract order.
    pub const ALL: [Self; FACE_COUNT] = [
        Self::Top,
        Self::Bottom,
        Self::Right,
        Self::Left,
        Self::Front,
        Self::Back,
    ];

    /// Returns the contract index (0-5).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Converts from a contract index.
    #[inline]
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < FACE_COUNT {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Unit offset to the neighbouring voxel across this face.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> [i32; 3] {
        match self {
            Self::Top => [0, 1, 0],
            Self::Bottom => [0, -1, 0],
            Self::Right => [1, 0, 0],
            Self::Left => [-1, 0, 0],
            Self::Front => [0, 0, 1],
            Self::Back => [0, 0, -1],
        }
    }
}

/// Fields of a packed face, as raw integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UnpackedFace {
    /// Local X (0-15).
    pub x: u8,
    /// Local Y (0-15).
    pub y: u8,
    /// Local Z (0-15).
    pub z: u8,
    /// Material id (0-255).
    pub material: u8,
    /// Direction index (0-7 representable, 0-5 valid).
    pub direction: u8,
}

/// A bit-packed visible face descriptor.
///
/// `repr(transparent)` over `u32` so a face list can be handed to a GPU
/// buffer with `bytemuck::cast_slice`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct PackedFace(u32);

impl PackedFace {
    /// Packs raw field values.
    ///
    /// Returns `None` if any field falls outside its bit range:
    /// coordinates 0-15, direction 0-5. The material is a full byte.
    #[inline]
    #[must_use]
    pub const fn pack(x: u8, y: u8, z: u8, material: u8, direction: u8) -> Option<Self> {
        if x as u32 > PACK_AXIS_MASK
            || y as u32 > PACK_AXIS_MASK
            || z as u32 > PACK_AXIS_MASK
            || direction as usize >= FACE_COUNT
        {
            return None;
        }
        Some(Self::pack_unchecked(x, y, z, material, direction))
    }

    /// Packs a face of a generated voxel.
    ///
    /// Callers guarantee `x`, `y`, `z` < 16, which holds for every validated
    /// chunk size.
    #[inline]
    #[must_use]
    pub const fn for_voxel(x: u8, y: u8, z: u8, material: VoxelMaterial, direction: FaceDirection) -> Self {
        debug_assert!(x < 16 && y < 16 && z < 16);
        Self::pack_unchecked(x, y, z, material.id(), direction.index())
    }

    #[inline]
    const fn pack_unchecked(x: u8, y: u8, z: u8, material: u8, direction: u8) -> Self {
        Self(
            (x as u32) << PACK_X_SHIFT
                | (y as u32) << PACK_Y_SHIFT
                | (z as u32) << PACK_Z_SHIFT
                | (material as u32) << PACK_MATERIAL_SHIFT
                | (direction as u32 & PACK_DIRECTION_MASK),
        )
    }

    /// Returns the packed value.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Splits the packed value into its raw fields.
    #[inline]
    #[must_use]
    pub const fn unpack(self) -> UnpackedFace {
        UnpackedFace {
            x: ((self.0 >> PACK_X_SHIFT) & PACK_AXIS_MASK) as u8,
            y: ((self.0 >> PACK_Y_SHIFT) & PACK_AXIS_MASK) as u8,
            z: ((self.0 >> PACK_Z_SHIFT) & PACK_AXIS_MASK) as u8,
            material: ((self.0 >> PACK_MATERIAL_SHIFT) & PACK_MATERIAL_MASK) as u8,
            direction: (self.0 & PACK_DIRECTION_MASK) as u8,
        }
    }

    /// Local position `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn position(self) -> [u8; 3] {
        let f = self.unpack();
        [f.x, f.y, f.z]
    }

    /// Material, if the id is a known one.
    #[inline]
    #[must_use]
    pub const fn material(self) -> Option<VoxelMaterial> {
        VoxelMaterial::from_id(self.unpack().material)
    }

    /// Direction, if the index is 0-5.
    #[inline]
    #[must_use]
    pub const fn direction(self) -> Option<FaceDirection> {
        FaceDirection::from_index(self.unpack().direction)
    }
}

impl From<PackedFace> for u32 {
    #[inline]
    fn from(face: PackedFace) -> Self {
        face.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_bijection() {
        for x in 0..16u8 {
            for y in 0..16u8 {
                for z in 0..16u8 {
                    for material in [0u8, 1, 5, 16, 20, 127, 255] {
                        for direction in 0..6u8 {
                            let face = PackedFace::pack(x, y, z, material, direction)
                                .expect("in range");
                            assert_eq!(
                                face.unpack(),
                                UnpackedFace { x, y, z, material, direction }
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_material_byte_survives() {
        for material in 0..=255u8 {
            let face = PackedFace::pack(15, 0, 7, material, 5).unwrap();
            assert_eq!(face.unpack().material, material);
            assert_eq!(face.position(), [15, 0, 7]);
        }
    }

    #[test]
    fn test_bit_layout() {
        // x=1, y=2, z=3, material=6, direction=4
        let face = PackedFace::pack(1, 2, 3, 6, 4).unwrap();
        assert_eq!(face.bits(), (1 << 20) | (2 << 16) | (3 << 12) | (6 << 4) | 4);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(PackedFace::pack(16, 0, 0, 0, 0).is_none());
        assert!(PackedFace::pack(0, 16, 0, 0, 0).is_none());
        assert!(PackedFace::pack(0, 0, 16, 0, 0).is_none());
        assert!(PackedFace::pack(0, 0, 0, 0, 6).is_none());
    }

    #[test]
    fn test_typed_accessors() {
        let face = PackedFace::for_voxel(7, 7, 0, VoxelMaterial::Sand, FaceDirection::Back);
        assert_eq!(face.material(), Some(VoxelMaterial::Sand));
        assert_eq!(face.direction(), Some(FaceDirection::Back));
    }

    #[test]
    fn test_direction_contract_order() {
        let offsets: Vec<[i32; 3]> = FaceDirection::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(
            offsets,
            vec![[0, 1, 0], [0, -1, 0], [1, 0, 0], [-1, 0, 0], [0, 0, 1], [0, 0, -1]]
        );
        for (i, dir) in FaceDirection::ALL.iter().enumerate() {
            assert_eq!(dir.index() as usize, i);
        }
    }
}
