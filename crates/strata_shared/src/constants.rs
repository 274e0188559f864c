//! # Chunk Geometry Constants
//!
//! Defaults and limits for chunk layout.
//!
//! **CRITICAL:** `MAX_CHUNK_SIZE` is dictated by the 4-bit coordinate
//! fields of [`PackedFace`](crate::PackedFace). Raising it silently
//! corrupts the material and direction bits.

// =============================================================================
// CHUNK GEOMETRY
// =============================================================================

/// Default chunk edge length in voxels (8 x 8 x 8 chunks).
pub const DEFAULT_CHUNK_SIZE: u8 = 8;

/// Default voxel edge length in world units.
pub const DEFAULT_VOXEL_SIZE: f64 = 1.0;

/// Largest chunk edge the face packing can address (4 bits per axis).
pub const MAX_CHUNK_SIZE: u8 = 16;

// =============================================================================
// FACE PACKING LAYOUT
// =============================================================================

/// Bit offset of the local X field.
pub const PACK_X_SHIFT: u32 = 20;
/// Bit offset of the local Y field.
pub const PACK_Y_SHIFT: u32 = 16;
/// Bit offset of the local Z field.
pub const PACK_Z_SHIFT: u32 = 12;
/// Bit offset of the material field.
pub const PACK_MATERIAL_SHIFT: u32 = 4;

/// Mask for one 4-bit coordinate field.
pub const PACK_AXIS_MASK: u32 = 0b1111;
/// Mask for the 8-bit material field.
pub const PACK_MATERIAL_MASK: u32 = 0xFF;
/// Mask for the 3-bit direction field.
pub const PACK_DIRECTION_MASK: u32 = 0b111;

/// Number of face directions. Direction indices are `0..FACE_COUNT`.
pub const FACE_COUNT: usize = 6;
