//! Shared-topology serialization of joined cells
//!
//! Joined rows are first encoded as a GeoJSON feature collection, then
//! converted to TopoJSON with coincident edges stored once as shared arcs.

/// Junction detection and arc deduplication
pub mod arcs;
/// TopoJSON document model, encoding and decoding
pub mod document;
/// Joined rows as GeoJSON features
pub mod features;

pub use arcs::{ArcRef, ArcSet};
pub use document::{TopoObject, Topology};
pub use features::to_feature_collection;
