//! Pipeline orchestration from source dataset to written topology

/// Stage sequencing and run summaries
pub mod executor;

pub use executor::{HexMapPipeline, RunSummary, generate_hex_map};
