//! TopoJSON document model
//!
//! A topology holds named objects whose polygon rings are lists of arc
//! references into a shared `arcs` array. Arcs keep full-precision
//! coordinates; no `transform` block is written.

use crate::io::error::{Result, serialization_error};
use crate::topology::arcs::{ArcRef, ArcSet};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use geojson::feature::Id;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Document type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TopologyType {
    /// The only valid value, `"Topology"`
    #[default]
    Topology,
}

/// A TopoJSON topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Always `"Topology"`
    #[serde(rename = "type")]
    pub kind: TopologyType,
    /// Named geometry objects
    pub objects: BTreeMap<String, TopoObject>,
    /// Shared coordinate sequences
    pub arcs: Vec<Vec<[f64; 2]>>,
    /// Extent of all arcs, absent when there are none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

/// A geometry object inside a topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TopoObject {
    /// Collection of nested objects
    GeometryCollection {
        /// Member objects
        geometries: Vec<TopoObject>,
    },
    /// Polygon as one arc-reference list per ring
    Polygon {
        /// Rings, exterior first
        arcs: Vec<Vec<ArcRef>>,
        /// Feature identifier
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
        /// Feature attributes
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        properties: Map<String, Value>,
    },
    /// Multipolygon as one ring list per polygon
    MultiPolygon {
        /// Polygons, each with rings exterior first
        arcs: Vec<Vec<Vec<ArcRef>>>,
        /// Feature identifier
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
        /// Feature attributes
        #[serde(default, skip_serializing_if = "Map::is_empty")]
        properties: Map<String, Value>,
    },
}

/// Ring counts of one input geometry, used to regroup flattened rings
enum Shape {
    Polygon(usize),
    MultiPolygon(Vec<usize>),
}

impl Topology {
    /// Convert a feature collection into a topology with one
    /// `GeometryCollection` object named `object_name`
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a feature has no geometry, a
    /// non-polygon geometry, or a position with fewer than two values
    pub fn from_feature_collection(
        collection: &FeatureCollection,
        object_name: &str,
    ) -> Result<Self> {
        let mut rings: Vec<LineString<f64>> = Vec::new();
        let mut shapes = Vec::with_capacity(collection.features.len());

        for (index, feature) in collection.features.iter().enumerate() {
            let geometry = feature
                .geometry
                .as_ref()
                .ok_or_else(|| serialization_error(&format!("feature {index} has no geometry")))?;

            let shape = match &geometry.value {
                geojson::Value::Polygon(polygon) => {
                    rings.extend(read_rings(polygon, index)?);
                    Shape::Polygon(polygon.len())
                }
                geojson::Value::MultiPolygon(polygons) => {
                    let mut counts = Vec::with_capacity(polygons.len());
                    for polygon in polygons {
                        rings.extend(read_rings(polygon, index)?);
                        counts.push(polygon.len());
                    }
                    Shape::MultiPolygon(counts)
                }
                _ => {
                    return Err(serialization_error(&format!(
                        "feature {index} is not a polygon or multipolygon"
                    )));
                }
            };
            shapes.push(shape);
        }

        let arc_set = ArcSet::build(&rings);
        let mut ring_refs = arc_set.rings.into_iter();

        let geometries = collection
            .features
            .iter()
            .zip(shapes)
            .map(|(feature, shape)| {
                let id = feature.id.as_ref().map(|id| match id {
                    Id::String(s) => Value::String(s.clone()),
                    Id::Number(n) => Value::Number(n.clone()),
                });
                let properties = feature.properties.clone().unwrap_or_default();

                match shape {
                    Shape::Polygon(count) => TopoObject::Polygon {
                        arcs: ring_refs.by_ref().take(count).collect(),
                        id,
                        properties,
                    },
                    Shape::MultiPolygon(counts) => TopoObject::MultiPolygon {
                        arcs: counts
                            .into_iter()
                            .map(|count| ring_refs.by_ref().take(count).collect())
                            .collect(),
                        id,
                        properties,
                    },
                }
            })
            .collect();

        let arcs: Vec<Vec<[f64; 2]>> = arc_set
            .arcs
            .iter()
            .map(|arc| arc.iter().map(|c| [c.x, c.y]).collect())
            .collect();

        let mut objects = BTreeMap::new();
        objects.insert(
            object_name.to_string(),
            TopoObject::GeometryCollection { geometries },
        );

        Ok(Self {
            kind: TopologyType::Topology,
            bbox: arcs_bbox(&arcs),
            objects,
            arcs,
        })
    }

    /// Rebuild the polygons of object `object_name`, one per geometry
    ///
    /// Polygons come back as single-member multipolygons.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the object does not exist or an arc
    /// reference is out of range
    pub fn decode_polygons(&self, object_name: &str) -> Result<Vec<MultiPolygon<f64>>> {
        let object = self
            .objects
            .get(object_name)
            .ok_or_else(|| serialization_error(&format!("no object named '{object_name}'")))?;

        let arcs: Vec<Vec<Coord<f64>>> = self
            .arcs
            .iter()
            .map(|arc| arc.iter().map(|&[x, y]| Coord { x, y }).collect())
            .collect();

        let mut decoded = Vec::new();
        decode_object(object, &arcs, &mut decoded)?;
        Ok(decoded)
    }

    /// Number of geometries in object `object_name`, nested collections
    /// flattened
    pub fn geometry_count(&self, object_name: &str) -> usize {
        fn count(object: &TopoObject) -> usize {
            match object {
                TopoObject::GeometryCollection { geometries } => {
                    geometries.iter().map(count).sum()
                }
                TopoObject::Polygon { .. } | TopoObject::MultiPolygon { .. } => 1,
            }
        }
        self.objects.get(object_name).map_or(0, count)
    }
}

fn read_rings(polygon: &geojson::PolygonType, feature: usize) -> Result<Vec<LineString<f64>>> {
    polygon
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|position| match (position.first(), position.get(1)) {
                    (Some(&x), Some(&y)) => Ok(Coord { x, y }),
                    _ => Err(serialization_error(&format!(
                        "feature {feature} has a position with fewer than two values"
                    ))),
                })
                .collect::<Result<LineString<f64>>>()
        })
        .collect()
}

fn arcs_bbox(arcs: &[Vec<[f64; 2]>]) -> Option<[f64; 4]> {
    arcs.iter().flatten().fold(None, |acc, &[x, y]| {
        Some(match acc {
            None => [x, y, x, y],
            Some([min_x, min_y, max_x, max_y]) => {
                [min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)]
            }
        })
    })
}

fn decode_rings(arcs: &[Vec<Coord<f64>>], rings: &[Vec<ArcRef>]) -> Result<Polygon<f64>> {
    let mut lines = rings.iter().map(|refs| {
        ArcSet::decode_ring(arcs, refs)
            .map(LineString::from)
            .ok_or_else(|| serialization_error(&"arc reference out of range"))
    });

    let exterior = lines.next().transpose()?.unwrap_or_else(|| LineString::new(vec![]));
    let interiors = lines.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn decode_object(
    object: &TopoObject,
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<MultiPolygon<f64>>,
) -> Result<()> {
    match object {
        TopoObject::GeometryCollection { geometries } => {
            for geometry in geometries {
                decode_object(geometry, arcs, out)?;
            }
        }
        TopoObject::Polygon { arcs: rings, .. } => {
            out.push(MultiPolygon::new(vec![decode_rings(arcs, rings)?]));
        }
        TopoObject::MultiPolygon { arcs: polygons, .. } => {
            let decoded = polygons
                .iter()
                .map(|rings| decode_rings(arcs, rings))
                .collect::<Result<Vec<_>>>()?;
            out.push(MultiPolygon::new(decoded));
        }
    }
    Ok(())
}
