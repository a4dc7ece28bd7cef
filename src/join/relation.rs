//! One-to-many relation between grid cells and source features

use crate::grid::{HexCell, HexGrid};
use crate::io::source::{Attributes, SourceFeature};

/// A grid cell that intersects a source feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellMatch {
    /// Grid index of the cell
    pub cell: usize,
    /// Dataset index of the feature
    pub feature: usize,
}

/// Ordered `(cell, feature)` pairs produced by a spatial join
///
/// Pairs are sorted by cell, then feature. A cell appears once per feature it
/// intersects and not at all when it intersects none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinRelation {
    pairs: Vec<CellMatch>,
}

impl JoinRelation {
    /// Build a relation from unordered pairs
    pub fn from_pairs(mut pairs: Vec<CellMatch>) -> Self {
        pairs.sort_unstable();
        pairs.dedup();
        Self { pairs }
    }

    /// All pairs in order
    pub const fn pairs(&self) -> &[CellMatch] {
        self.pairs.as_slice()
    }

    /// Number of joined rows
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no cell matched any feature
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of distinct cells with at least one match
    pub fn matched_cells(&self) -> usize {
        let mut count = 0;
        let mut previous = None;
        for pair in &self.pairs {
            if previous != Some(pair.cell) {
                count += 1;
                previous = Some(pair.cell);
            }
        }
        count
    }

    /// Resolve every pair against the grid and features it was built from
    ///
    /// Pairs whose indices fall outside `grid` or `features` are skipped.
    pub fn rows<'a>(
        &'a self,
        grid: &'a HexGrid,
        features: &'a [SourceFeature],
    ) -> impl Iterator<Item = JoinedCell<'a>> + 'a {
        self.pairs.iter().filter_map(move |pair| {
            Some(JoinedCell {
                cell_index: pair.cell,
                feature_index: pair.feature,
                cell: grid.get(pair.cell)?,
                attributes: &features.get(pair.feature)?.attributes,
            })
        })
    }
}

/// One joined row: a cell with the attributes of one intersecting feature
#[derive(Debug, Clone, Copy)]
pub struct JoinedCell<'a> {
    /// Grid index of the cell
    pub cell_index: usize,
    /// Dataset index of the feature
    pub feature_index: usize,
    /// The cell itself
    pub cell: &'a HexCell,
    /// Full attribute record of the feature
    pub attributes: &'a Attributes,
}
