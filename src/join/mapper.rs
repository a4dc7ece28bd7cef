//! Spatial join of grid cells against source features
//!
//! Feature envelopes go into an R-tree; each cell queries it with its own
//! envelope and confirms candidates with the exact `intersects` predicate.
//! `intersects` follows DE-9IM, so cells that only touch a feature's
//! boundary, even at a single point, are kept.

use crate::grid::HexGrid;
use crate::io::source::SourceFeature;
use crate::join::relation::{CellMatch, JoinRelation};
use geo::{BoundingRect, Intersects, Rect};
use rstar::{AABB, RTree, RTreeObject};

/// Envelope of one source feature, keyed by its dataset index
#[derive(Debug, Clone, Copy)]
struct FeatureEnvelope {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for FeatureEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn to_aabb(rect: Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}

/// Join every cell with every feature it intersects
pub fn join(grid: &HexGrid, features: &[SourceFeature]) -> JoinRelation {
    join_with_progress(grid, features, |_| {})
}

/// Join every cell with every feature it intersects, calling `on_cell` after
/// each cell has been tested
pub fn join_with_progress(
    grid: &HexGrid,
    features: &[SourceFeature],
    mut on_cell: impl FnMut(usize),
) -> JoinRelation {
    // Features without coordinates have no envelope and match nothing
    let envelopes: Vec<FeatureEnvelope> = features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            feature.geometry.bounding_rect().map(|rect| FeatureEnvelope {
                index,
                envelope: to_aabb(rect),
            })
        })
        .collect();
    let tree = RTree::bulk_load(envelopes);

    let mut pairs = Vec::new();
    let mut candidates = Vec::new();

    for (cell_index, cell) in grid.cells().iter().enumerate() {
        if let Some(rect) = cell.polygon().bounding_rect() {
            candidates.clear();
            candidates.extend(
                tree.locate_in_envelope_intersecting(&to_aabb(rect))
                    .map(|entry| entry.index),
            );
            candidates.sort_unstable();

            for &feature_index in &candidates {
                let hit = features
                    .get(feature_index)
                    .is_some_and(|feature| feature.geometry.intersects(cell.polygon()));
                if hit {
                    pairs.push(CellMatch {
                        cell: cell_index,
                        feature: feature_index,
                    });
                }
            }
        }

        on_cell(cell_index);
    }

    JoinRelation::from_pairs(pairs)
}
