//! Source datasets: polygon features with attribute records
//!
//! Readers for concrete formats implement [`DatasetReader`]; [`open_dataset`]
//! picks one from the file extension.

use crate::io::crs::{Crs, Reprojector};
use crate::io::error::{Result, reprojection_error, source_read_error};
use crate::io::geojson_reader::GeoJsonReader;
use crate::io::shapefile_reader::ShapefileReader;
use geo::{BoundingRect, MultiPolygon, Rect};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Attribute record of a feature
pub type Attributes = Map<String, Value>;

/// A polygonal feature with its attribute record
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFeature {
    /// Outline of the feature
    pub geometry: MultiPolygon<f64>,
    /// Attribute values by field name
    pub attributes: Attributes,
}

impl SourceFeature {
    /// Create a feature from its geometry and attributes
    pub const fn new(geometry: MultiPolygon<f64>, attributes: Attributes) -> Self {
        Self {
            geometry,
            attributes,
        }
    }
}

/// Features read from one dataset, with the reference they are expressed in
#[derive(Debug, Clone, Default)]
pub struct SourceDataset {
    /// Features in file order
    pub features: Vec<SourceFeature>,
    /// Coordinate reference declared by the dataset, if any
    pub crs: Option<Crs>,
}

impl SourceDataset {
    /// Number of features
    pub const fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the dataset holds no features
    pub const fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Transform every feature into `target`
    ///
    /// `source_override` takes precedence over the declared reference.
    ///
    /// # Errors
    ///
    /// Returns a reprojection error if neither reference is available, the
    /// reference is unknown, or a coordinate fails to transform
    pub fn reproject(self, source_override: Option<&Crs>, target: &Crs) -> Result<Self> {
        let source = source_override.or(self.crs.as_ref()).ok_or_else(|| {
            reprojection_error(
                &"<missing>",
                &"dataset declares no coordinate reference; pass --source-crs",
            )
        })?;

        let reprojector = Reprojector::new(source, target)?;
        if reprojector.is_identity() {
            debug!(crs = %target, "dataset already in target reference");
            return Ok(Self {
                features: self.features,
                crs: Some(target.clone()),
            });
        }

        debug!(from = %source, to = %target, features = self.features.len(), "reprojecting");
        let features = self
            .features
            .into_iter()
            .map(|feature| {
                Ok(SourceFeature {
                    geometry: reprojector.reproject(&feature.geometry)?,
                    attributes: feature.attributes,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            features,
            crs: Some(target.clone()),
        })
    }
}

/// Extent of all features, or `None` when there are none
pub fn total_bounds(features: &[SourceFeature]) -> Option<Rect<f64>> {
    features
        .iter()
        .filter_map(|feature| feature.geometry.bounding_rect())
        .reduce(|acc, rect| {
            Rect::new(
                geo::Coord {
                    x: acc.min().x.min(rect.min().x),
                    y: acc.min().y.min(rect.min().y),
                },
                geo::Coord {
                    x: acc.max().x.max(rect.max().x),
                    y: acc.max().y.max(rect.max().y),
                },
            )
        })
}

/// Reads a dataset format into memory
pub trait DatasetReader {
    /// Read every feature of the dataset at `path`
    ///
    /// # Errors
    ///
    /// Returns a source read error if the dataset is missing, unreadable,
    /// or holds non-polygon geometry
    fn read(&self, path: &Path) -> Result<SourceDataset>;
}

/// Read the dataset at `path` with the reader matching its extension
///
/// # Errors
///
/// Returns a source read error for missing files, unsupported extensions,
/// and any reader failure
pub fn open_dataset(path: &Path) -> Result<SourceDataset> {
    if !path.is_file() {
        return Err(source_read_error(path, &"file does not exist"));
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "shp" => ShapefileReader.read(path),
        "geojson" | "json" => GeoJsonReader.read(path),
        other => Err(source_read_error(
            path,
            &format!("unsupported dataset format '.{other}' (expected .shp or .geojson)"),
        )),
    }
}
