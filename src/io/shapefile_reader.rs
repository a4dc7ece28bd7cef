//! ESRI shapefile bundles (`.shp` + `.dbf` + optional `.prj`)

use crate::io::crs::Crs;
use crate::io::error::{HexMapError, Result, source_read_error};
use crate::io::source::{Attributes, DatasetReader, SourceDataset, SourceFeature};
use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use serde_json::Value;
use shapefile::dbase::FieldValue;
use shapefile::{PolygonRing, Shape};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Reads polygon shapefiles through the `shapefile` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapefileReader;

impl DatasetReader for ShapefileReader {
    fn read(&self, path: &Path) -> Result<SourceDataset> {
        let mut reader =
            shapefile::Reader::from_path(path).map_err(|source| HexMapError::Shapefile {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;

        let mut features = Vec::new();
        let mut skipped = 0_usize;

        for (record_index, item) in reader.iter_shapes_and_records().enumerate() {
            let (shape, record) = item.map_err(|source| HexMapError::Shapefile {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;

            let geometry = match shape {
                Shape::NullShape => {
                    skipped += 1;
                    continue;
                }
                Shape::Polygon(polygon) => {
                    rings_to_multipolygon(polygon.rings(), |p| Coord { x: p.x, y: p.y })
                }
                Shape::PolygonM(polygon) => {
                    rings_to_multipolygon(polygon.rings(), |p| Coord { x: p.x, y: p.y })
                }
                Shape::PolygonZ(polygon) => {
                    rings_to_multipolygon(polygon.rings(), |p| Coord { x: p.x, y: p.y })
                }
                other => {
                    return Err(source_read_error(
                        path,
                        &format!(
                            "record {record_index} has {:?} geometry; only polygons are supported",
                            other.shapetype()
                        ),
                    ));
                }
            };

            let fields: HashMap<String, FieldValue> = record.into();
            let attributes: Attributes = fields
                .into_iter()
                .map(|(name, value)| (name, field_value_to_json(value)))
                .collect();

            features.push(SourceFeature::new(geometry, attributes));
        }

        if skipped > 0 {
            debug!(skipped, "skipped null shapes");
        }

        Ok(SourceDataset {
            features,
            crs: read_prj(path)?,
        })
    }
}

/// Assemble shapefile polygon rings into a multipolygon
///
/// Each outer ring starts a polygon. An inner ring becomes a hole of the
/// first outer ring that contains its first vertex, falling back to the most
/// recent outer ring.
pub fn rings_to_multipolygon<P>(
    rings: &[PolygonRing<P>],
    to_coord: impl Fn(&P) -> Coord<f64>,
) -> MultiPolygon<f64> {
    let mut exteriors: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    let mut orphans = Vec::new();

    for ring in rings {
        match ring {
            PolygonRing::Outer(points) => {
                let line: LineString<f64> = points.iter().map(&to_coord).collect();
                exteriors.push((line, Vec::new()));
            }
            PolygonRing::Inner(points) => {
                let line: LineString<f64> = points.iter().map(&to_coord).collect();
                let Some(first) = line.0.first().copied() else {
                    continue;
                };

                let holder = exteriors
                    .iter()
                    .position(|(exterior, _)| {
                        Polygon::new(exterior.clone(), vec![]).contains(&Point::from(first))
                    })
                    .or_else(|| exteriors.len().checked_sub(1));

                match holder.and_then(|i| exteriors.get_mut(i)) {
                    Some((_, holes)) => holes.push(line),
                    None => orphans.push(line),
                }
            }
        }
    }

    if !orphans.is_empty() {
        warn!(count = orphans.len(), "inner rings without an outer ring dropped");
    }

    MultiPolygon::new(
        exteriors
            .into_iter()
            .map(|(exterior, holes)| Polygon::new(exterior, holes))
            .collect(),
    )
}

/// Convert a dBASE field value to JSON
///
/// Empty values become `null`; dates are written as `YYYY-MM-DD`.
pub fn field_value_to_json(value: FieldValue) -> Value {
    match value {
        FieldValue::Character(text) => {
            text.map_or(Value::Null, |s| Value::String(s.trim().to_string()))
        }
        FieldValue::Memo(text) => Value::String(text),
        FieldValue::Numeric(number) => number.map_or(Value::Null, numeric_to_json),
        FieldValue::Float(number) => number.map_or(Value::Null, |n| float_to_json(f64::from(n))),
        FieldValue::Double(number) | FieldValue::Currency(number) => float_to_json(number),
        FieldValue::Integer(number) => Value::from(number),
        FieldValue::Logical(flag) => flag.map_or(Value::Null, Value::Bool),
        FieldValue::Date(date) => date.map_or(Value::Null, |d| {
            Value::String(format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()))
        }),
        other => Value::String(format!("{other:?}")),
    }
}

// Numeric fields without decimals hold integers
fn numeric_to_json(number: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if number.fract() == 0.0 && number.abs() < MAX_EXACT {
        Value::from(number as i64)
    } else {
        float_to_json(number)
    }
}

fn float_to_json(number: f64) -> Value {
    serde_json::Number::from_f64(number).map_or(Value::Null, Value::Number)
}

fn read_prj(shp_path: &Path) -> Result<Option<Crs>> {
    let prj_path = shp_path.with_extension("prj");
    if !prj_path.is_file() {
        return Ok(None);
    }

    let wkt = std::fs::read_to_string(&prj_path).map_err(|e| source_read_error(&prj_path, &e))?;
    Crs::from_wkt(&wkt).map(Some)
}
