//! Joined rows as a GeoJSON feature collection

use crate::io::configuration::{CELL_INDEX_PROPERTY, FEATURE_INDEX_PROPERTY};
use crate::join::JoinedCell;
use geo::{LineString, Polygon};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::Value;
use tracing::warn;

/// Encode joined rows as features
///
/// Each feature carries the cell outline, the source attributes, the cell's
/// grid index under `index` and the feature's dataset index under
/// `index_right`. Feature ids number the rows from zero.
pub fn to_feature_collection<'a>(
    rows: impl IntoIterator<Item = JoinedCell<'a>>,
) -> FeatureCollection {
    let mut collisions_reported = false;

    let features = rows
        .into_iter()
        .enumerate()
        .map(|(row, joined)| {
            let mut properties = joined.attributes.clone();

            if !collisions_reported
                && (properties.contains_key(CELL_INDEX_PROPERTY)
                    || properties.contains_key(FEATURE_INDEX_PROPERTY))
            {
                warn!(
                    "source attributes named '{CELL_INDEX_PROPERTY}' or '{FEATURE_INDEX_PROPERTY}' are replaced by join indices"
                );
                collisions_reported = true;
            }

            properties.insert(CELL_INDEX_PROPERTY.to_string(), Value::from(joined.cell_index));
            properties.insert(
                FEATURE_INDEX_PROPERTY.to_string(),
                Value::from(joined.feature_index),
            );

            Feature {
                bbox: None,
                geometry: Some(polygon_geometry(joined.cell.polygon())),
                id: Some(Id::String(row.to_string())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// GeoJSON geometry for a polygon, coordinates copied exactly
pub fn polygon_geometry(polygon: &Polygon<f64>) -> Geometry {
    let ring = |line: &LineString<f64>| {
        line.coords()
            .map(|c| vec![c.x, c.y])
            .collect::<Vec<_>>()
    };

    let mut rings = vec![ring(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring));

    Geometry::new(geojson::Value::Polygon(rings))
}
