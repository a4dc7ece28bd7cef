//! Hexagonal grid generation
//!
//! This module contains:
//! - Bounding box validation
//! - The flat-top hexagon vertex template
//! - Grid layout and generation over a bounding box

/// Validated axis-aligned bounding boxes
pub mod bounds;
/// Grid dimensions and cell generation
pub mod generator;
/// Single hexagon cells and the vertex lattice they sit on
pub mod hexagon;

pub use bounds::BoundingBox;
pub use generator::{GridLayout, HexGrid, validate_edge_length};
pub use hexagon::HexCell;
