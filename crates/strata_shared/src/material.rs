//! # Voxel Materials
//!
//! The closed material taxonomy. Numeric ids are part of the encoded chunk
//! format and of the packed face stream: never renumber a variant.

use serde::{Deserialize, Serialize};

/// Material of a single voxel.
///
/// Id 16 is reserved and never produced by terrain generation. It exists so
/// the gap is explicit rather than a silent hole in the numbering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VoxelMaterial {
    /// Empty space.
    #[default]
    Air = 0,
    /// Grass topsoil.
    Grass = 1,
    /// Dirt subsoil.
    Dirt = 2,
    /// Frozen, compacted dirt (tundra subsoil).
    PackedDirt = 3,
    /// Sand.
    Sand = 4,
    /// Water. The only non-air material that does not occlude faces.
    Water = 5,
    /// Bedrock stone.
    Stone = 6,
    /// Mud (lake and sea beds).
    Mud = 7,
    /// Sandstone.
    Sandstone = 8,
    /// Snow cover.
    Snow = 9,
    /// Mycelium topsoil (humid, hot, wacky chunks).
    Mycelium = 10,
    /// Fertile jungle dirt.
    FertileDirt = 11,
    /// Gneiss.
    Gneiss = 12,
    /// Marble.
    Marble = 13,
    /// Gabbro.
    Gabbro = 14,
    /// Andesite.
    Andesite = 15,
    /// Unused slot, kept for numeric stability.
    Reserved16 = 16,
    /// Basalt.
    Basalt = 17,
    /// Lava.
    Lava = 18,
    /// Red sand.
    RedSand = 19,
    /// Red sandstone.
    RedSandstone = 20,
}

impl VoxelMaterial {
    /// Every material in id order.
    pub const ALL: [Self; 21] = [
        Self::Air,
        Self::Grass,
        Self::Dirt,
        Self::PackedDirt,
        Self::Sand,
        Self::Water,
        Self::Stone,
        Self::Mud,
        Self::Sandstone,
        Self::Snow,
        Self::Mycelium,
        Self::FertileDirt,
        Self::Gneiss,
        Self::Marble,
        Self::Gabbro,
        Self::Andesite,
        Self::Reserved16,
        Self::Basalt,
        Self::Lava,
        Self::RedSand,
        Self::RedSandstone,
    ];

    /// Highest assigned id.
    pub const MAX_ID: u8 = 20;

    /// Returns the stable numeric id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Converts from a numeric id. Returns `None` past [`Self::MAX_ID`].
    #[inline]
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        if id > Self::MAX_ID {
            None
        } else {
            Some(Self::ALL[id as usize])
        }
    }

    /// Returns true for empty space.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Returns true if a face next to this material stays visible.
    ///
    /// Air and water are see-through; everything else occludes.
    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Air | Self::Water)
    }
}

impl From<VoxelMaterial> for u8 {
    #[inline]
    fn from(material: VoxelMaterial) -> Self {
        material.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        for (i, material) in VoxelMaterial::ALL.iter().enumerate() {
            assert_eq!(material.id() as usize, i);
            assert_eq!(VoxelMaterial::from_id(i as u8), Some(*material));
        }
        assert_eq!(VoxelMaterial::Water.id(), 5);
        assert_eq!(VoxelMaterial::Basalt.id(), 17);
        assert_eq!(VoxelMaterial::from_id(21), None);
        assert_eq!(VoxelMaterial::from_id(255), None);
    }

    #[test]
    fn test_transparency() {
        assert!(VoxelMaterial::Air.is_transparent());
        assert!(VoxelMaterial::Water.is_transparent());
        assert!(!VoxelMaterial::Stone.is_transparent());
        assert!(!VoxelMaterial::Lava.is_transparent());
    }
}
