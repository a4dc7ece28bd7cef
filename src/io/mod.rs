//! Input, output, and the command-line surface
//!
//! This module contains:
//! - Dataset readers for shapefiles and GeoJSON
//! - Coordinate reference parsing and reprojection
//! - Topology output, error types, and run configuration
//! - CLI parsing, logging setup, and progress bars

/// Command-line arguments and the conversion driver
pub mod cli;
/// Constants and pipeline settings
pub mod configuration;
/// Coordinate references and reprojection
pub mod crs;
/// Error types for every pipeline stage
pub mod error;
/// GeoJSON dataset reader
pub mod geojson_reader;
/// Log subscriber setup
pub mod logging;
/// Topology document writing and reading
pub mod output;
/// Stage progress bars
pub mod progress;
/// Shapefile dataset reader
pub mod shapefile_reader;
/// Dataset model and reader dispatch
pub mod source;
