//! # Region Report
//!
//! Aggregate statistics over a batch of generated chunks.

use std::fmt;
use std::time::Duration;

use strata_procedural::ChunkEntry;

/// Summary of one generated region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionReport {
    /// Chunks generated.
    pub chunks: usize,
    /// Chunks that were entirely air.
    pub empty_chunks: usize,
    /// Visible faces across all chunks.
    pub faces: usize,
    /// Runs across all chunks.
    pub runs: usize,
    /// Dense bytes (one per voxel).
    pub raw_bytes: usize,
    /// Bytes after run-length encoding.
    pub encoded_bytes: usize,
    /// Wall time of the generation pass.
    pub elapsed: Duration,
}

impl RegionReport {
    /// Folds a region's entries into a report.
    #[must_use]
    pub fn collect<'a, I>(entries: I, chunk_volume: usize, elapsed: Duration) -> Self
    where
        I: IntoIterator<Item = &'a ChunkEntry>,
    {
        let mut report = Self {
            elapsed,
            ..Self::default()
        };
        for entry in entries {
            report.chunks += 1;
            report.empty_chunks += usize::from(entry.is_empty);
            report.faces += entry.face_count();
            report.runs += entry.encoded.run_count();
            report.raw_bytes += chunk_volume;
            report.encoded_bytes += entry.encoded.encoded_bytes();
        }
        report
    }

    /// Raw bytes per encoded byte. Zero for an empty report.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.encoded_bytes == 0 {
            return 0.0;
        }
        self.raw_bytes as f64 / self.encoded_bytes as f64
    }

    /// Chunks per second.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.chunks as f64 / secs
    }
}

impl fmt::Display for RegionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ SUMMARY ────────────────────────────────────┐")?;
        writeln!(f, "│ Chunks:        {:>10}", self.chunks)?;
        writeln!(f, "│ Empty:         {:>10}", self.empty_chunks)?;
        writeln!(f, "│ Faces:         {:>10}", self.faces)?;
        writeln!(f, "│ Runs:          {:>10}", self.runs)?;
        writeln!(f, "│ Raw:           {:>10} bytes", self.raw_bytes)?;
        writeln!(f, "│ Encoded:       {:>10} bytes", self.encoded_bytes)?;
        writeln!(f, "│ Compression:   {:>10.1}x", self.compression_ratio())?;
        writeln!(f, "│ Time:          {:>10.2?}", self.elapsed)?;
        writeln!(f, "│ Throughput:    {:>10.0} chunks/s", self.throughput())?;
        write!(f, "└──────────────────────────────────────────────┘")
    }
}
