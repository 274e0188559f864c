//! # STRATA Shared
//!
//! Common voxel types used by the generator and by downstream consumers.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - noise or terrain generation code
//! - any rendering or windowing crate
//!
//! A mesh builder links against this crate alone to decode the
//! [`PackedFace`] stream emitted by `strata_procedural`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod coord;
pub mod face;
pub mod material;

pub use constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_VOXEL_SIZE, MAX_CHUNK_SIZE,
};
pub use coord::{ChunkCoord, LocalPos, WorldPos};
pub use face::{FaceDirection, PackedFace, UnpackedFace};
pub use material::VoxelMaterial;
