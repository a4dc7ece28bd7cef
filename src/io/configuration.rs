//! Pipeline constants and runtime configuration

use crate::io::crs::Crs;

/// Default hexagon edge length, in degrees
pub const DEFAULT_HEX_SIZE: f64 = 0.05;

/// Reference every grid and output is expressed in (WGS84 longitude/latitude)
pub const TARGET_CRS: Crs = Crs::Epsg(4326);

/// Reference of every GeoJSON document (RFC 7946)
pub const GEOJSON_CRS: Crs = Crs::Epsg(4326);

// Output settings
/// Suffix added to the input stem for the default output file
pub const OUTPUT_SUFFIX: &str = "_hex_map";
/// Extension of the default output file
pub const OUTPUT_EXTENSION: &str = "topojson";
/// Name of the joined-cell object inside the topology
pub const DEFAULT_OBJECT_NAME: &str = "data";

// Property names written alongside each feature's attributes
/// Property holding the cell's grid index
pub const CELL_INDEX_PROPERTY: &str = "index";
/// Property holding the matched feature's dataset index
pub const FEATURE_INDEX_PROPERTY: &str = "index_right";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Hexagon edge length in target reference units
    pub hex_size: f64,
    /// Reference the grid and output are expressed in
    pub target_crs: Crs,
    /// Reference to assume for the source instead of the declared one
    pub source_crs: Option<Crs>,
    /// Name of the joined-cell object inside the topology
    pub object_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hex_size: DEFAULT_HEX_SIZE,
            target_crs: TARGET_CRS,
            source_crs: None,
            object_name: DEFAULT_OBJECT_NAME.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Configuration with the given edge length and defaults elsewhere
    pub fn with_hex_size(hex_size: f64) -> Self {
        Self {
            hex_size,
            ..Self::default()
        }
    }
}
