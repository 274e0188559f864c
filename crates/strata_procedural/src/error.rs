//! # Generation Error Types
//!
//! Generation itself is pure arithmetic and cannot fail. Errors come from
//! two places only: a configuration that the packing format cannot
//! represent, and an encoded chunk whose run lengths disagree with the
//! expected volume.

use thiserror::Error;

/// Errors that can occur while configuring or decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Chunk edge length does not fit the 4-bit face coordinate fields.
    #[error("chunk size {size} out of range: must be 1..={max}")]
    ChunkSizeOutOfRange {
        /// The rejected edge length.
        size: u8,
        /// Largest supported edge length.
        max: u8,
    },

    /// Voxel size must be a positive, finite number of world units.
    #[error("invalid voxel size: {0}")]
    InvalidVoxelSize(f64),

    /// A noise channel's parameters cannot produce a field.
    #[error("invalid noise channel `{channel}`: {reason}")]
    InvalidNoiseChannel {
        /// Channel name.
        channel: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Run lengths of an encoded field do not sum to the expected volume.
    #[error("decode length mismatch: expected {expected} voxels, runs sum to {actual}")]
    DecodeLengthMismatch {
        /// Volume the caller asked for.
        expected: usize,
        /// Sum of encoded run lengths.
        actual: usize,
    },

    /// Configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenerationError>;
