//! GeoJSON documents (RFC 7946, always WGS84 longitude/latitude)

use crate::io::configuration::GEOJSON_CRS;
use crate::io::error::{HexMapError, Result, source_read_error};
use crate::io::source::{DatasetReader, SourceDataset, SourceFeature};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{GeoJson, Geometry, PolygonType};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Reads polygon features from GeoJSON through the `geojson` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonReader;

impl DatasetReader for GeoJsonReader {
    fn read(&self, path: &Path) -> Result<SourceDataset> {
        let file = File::open(path).map_err(|e| source_read_error(path, &e))?;
        let geojson =
            GeoJson::from_reader(BufReader::new(file)).map_err(|source| HexMapError::GeoJson {
                path: path.to_path_buf(),
                source: Box::new(geojson::Error::MalformedJson(source)),
            })?;

        let features = features_from_geojson(geojson)
            .map_err(|reason| source_read_error(path, &reason))?;

        Ok(SourceDataset {
            features,
            crs: Some(GEOJSON_CRS),
        })
    }
}

/// Extract polygon features from a parsed document
///
/// Features without geometry are skipped.
///
/// # Errors
///
/// Returns a description of the first non-polygon geometry or malformed
/// position
pub fn features_from_geojson(geojson: GeoJson) -> std::result::Result<Vec<SourceFeature>, String> {
    let mut features = Vec::new();

    match geojson {
        GeoJson::FeatureCollection(collection) => {
            let mut skipped = 0_usize;
            for (index, feature) in collection.features.into_iter().enumerate() {
                let Some(geometry) = feature.geometry else {
                    skipped += 1;
                    continue;
                };
                let geometry = to_multipolygon(&geometry)
                    .map_err(|reason| format!("feature {index}: {reason}"))?;
                features.push(SourceFeature::new(
                    geometry,
                    feature.properties.unwrap_or_default(),
                ));
            }
            if skipped > 0 {
                debug!(skipped, "skipped features without geometry");
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                features.push(SourceFeature::new(
                    to_multipolygon(&geometry)?,
                    feature.properties.unwrap_or_default(),
                ));
            }
        }
        GeoJson::Geometry(geometry) => {
            features.push(SourceFeature::new(
                to_multipolygon(&geometry)?,
                serde_json::Map::new(),
            ));
        }
    }

    Ok(features)
}

fn to_multipolygon(geometry: &Geometry) -> std::result::Result<MultiPolygon<f64>, String> {
    match &geometry.value {
        geojson::Value::Polygon(rings) => Ok(MultiPolygon::new(vec![to_polygon(rings)?])),
        geojson::Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| to_polygon(rings))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(MultiPolygon::new),
        geojson::Value::Point(_) | geojson::Value::MultiPoint(_) => {
            Err("point geometry is not supported; only polygons are".to_string())
        }
        geojson::Value::LineString(_) | geojson::Value::MultiLineString(_) => {
            Err("line geometry is not supported; only polygons are".to_string())
        }
        geojson::Value::GeometryCollection(_) => {
            Err("geometry collections are not supported; only polygons are".to_string())
        }
    }
}

fn to_polygon(rings: &PolygonType) -> std::result::Result<Polygon<f64>, String> {
    let mut lines = rings.iter().map(|ring| {
        ring.iter()
            .map(|position| match (position.first(), position.get(1)) {
                (Some(&x), Some(&y)) => Ok(Coord { x, y }),
                _ => Err(format!("position {position:?} has fewer than two values")),
            })
            .collect::<std::result::Result<LineString<f64>, String>>()
    });

    let exterior = lines
        .next()
        .transpose()?
        .ok_or_else(|| "polygon has no exterior ring".to_string())?;
    let interiors = lines.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, interiors))
}
