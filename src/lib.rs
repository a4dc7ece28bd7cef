//! Hexagonal tile maps from polygon datasets
//!
//! A dataset's extent is covered with flat-topped hexagons, every hexagon that
//! touches a feature takes on that feature's attributes, and the joined cells
//! are written as TopoJSON with shared edges stored once.

#![forbid(unsafe_code)]

/// Hexagon grid generation over a bounding box
pub mod grid;
/// Input/output operations and error handling
pub mod io;
/// Spatial join between grid cells and source features
pub mod join;
/// End-to-end conversion from dataset to topology file
pub mod pipeline;
/// Shared-arc topology encoding
pub mod topology;

pub use io::error::{HexMapError, Result};
