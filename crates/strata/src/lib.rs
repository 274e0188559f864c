//! # STRATA
//!
//! Procedural voxel worlds, compressed and visibility-culled.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        STRATA                                 │
//! ├───────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  ┌──────────────┐    ┌─────────────────────────────────────┐  │
//! │  │ strata_shared│<───│ strata_procedural                   │  │
//! │  │              │    │                                     │  │
//! │  │  • Materials │    │  noise ─> climate ─> biome          │  │
//! │  │  • Coords    │    │              │                      │  │
//! │  │  • PackedFace│    │              v                      │  │
//! │  └──────────────┘    │  field ─> rle ─> visibility ─> cache│  │
//! │                      └─────────────────────────────────────┘  │
//! │                                                               │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `cli`: `strata_gen` option parsing and configuration loading
//! - `report`: Region statistics

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod report;

// Re-export the layers
pub use strata_procedural as procedural;
pub use strata_shared as shared;

pub use cli::{CliError, GenOptions};
pub use report::RegionReport;
