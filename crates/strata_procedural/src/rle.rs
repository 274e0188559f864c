//! # Run-Length Codec
//!
//! Lossless chunk compression as `(count, material)` pairs in field index
//! order. Runs are maximal: no two neighbouring runs share a material.
//!
//! An all-air chunk encodes to exactly one run, which doubles as the
//! emptiness signal for the chunk cache.

use strata_shared::VoxelMaterial;

use crate::error::{GenResult, GenerationError};
use crate::field::VoxelField;

/// One run of identical materials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    /// Number of consecutive cells.
    pub count: u16,
    /// Material of every cell in the run.
    pub material: VoxelMaterial,
}

impl Run {
    /// Encoded size of one run in bytes (u16 count + u8 material).
    pub const ENCODED_BYTES: usize = 3;

    /// Creates a run.
    #[inline]
    #[must_use]
    pub const fn new(count: u16, material: VoxelMaterial) -> Self {
        Self { count, material }
    }
}

/// Run-length encoded voxel field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EncodedField {
    runs: Vec<Run>,
}

impl EncodedField {
    /// Encodes a dense field.
    #[must_use]
    pub fn encode(field: &VoxelField) -> Self {
        Self::encode_cells(field.cells())
    }

    /// Encodes cells in the given order.
    ///
    /// Runs longer than `u16::MAX` are split; that cannot happen for any
    /// chunk size the packing format accepts.
    #[must_use]
    pub fn encode_cells(cells: &[VoxelMaterial]) -> Self {
        let mut runs: Vec<Run> = Vec::new();
        for &material in cells {
            match runs.last_mut() {
                Some(run) if run.material == material && run.count < u16::MAX => run.count += 1,
                _ => runs.push(Run::new(1, material)),
            }
        }
        Self { runs }
    }

    /// Builds an encoded field from raw runs.
    #[must_use]
    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Expands into `total` cells.
    ///
    /// # Errors
    ///
    /// Returns `DecodeLengthMismatch` if the run lengths do not sum to
    /// `total`. Nothing is truncated or padded.
    pub fn decode(&self, total: usize) -> GenResult<Vec<VoxelMaterial>> {
        let actual = self.total_len();
        if actual != total {
            return Err(GenerationError::DecodeLengthMismatch {
                expected: total,
                actual,
            });
        }

        let mut cells = Vec::with_capacity(total);
        for run in &self.runs {
            cells.extend(std::iter::repeat(run.material).take(usize::from(run.count)));
        }
        Ok(cells)
    }

    /// Expands into a field of edge `edge`.
    ///
    /// # Errors
    ///
    /// Returns `DecodeLengthMismatch` if the runs do not cover `edge^3` cells.
    pub fn decode_field(&self, edge: u8) -> GenResult<VoxelField> {
        let n = usize::from(edge);
        VoxelField::from_cells(edge, self.decode(n * n * n)?)
    }

    /// Returns true if this is the single all-air run.
    #[inline]
    #[must_use]
    pub fn is_empty_chunk(&self) -> bool {
        matches!(self.runs.as_slice(), [run] if run.material.is_air())
    }

    /// Sum of all run lengths.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.runs.iter().map(|run| usize::from(run.count)).sum()
    }

    /// Runs in emission order.
    #[inline]
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs.
    #[inline]
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Encoded size in bytes.
    #[inline]
    #[must_use]
    pub fn encoded_bytes(&self) -> usize {
        self.runs.len() * Run::ENCODED_BYTES
    }
}
