//! Flat-top hexagon cells
//!
//! Every vertex of a flat-top tiling lies on a lattice with a pitch of half an
//! edge horizontally and half a row vertically. Cells compute their vertices
//! as integer lattice offsets from their center, so two neighbours produce
//! bit-identical coordinates for the vertices they share.

use geo::{Coord, LineString, Polygon};

/// Lattice offsets of the six vertices relative to the cell center
///
/// Counter-clockwise, starting at the lower-left vertex. Horizontal offsets
/// are in half edges, vertical offsets in half rows.
pub const VERTEX_TEMPLATE: [(i64, i64); 6] = [(-1, -1), (1, -1), (2, 0), (1, 1), (-1, 1), (-2, 0)];

/// Vertex lattice anchored at the grid origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLattice {
    origin: Coord<f64>,
    half_edge: f64,
    half_row: f64,
}

impl HexLattice {
    /// Create the lattice for hexagons with the given edge length
    ///
    /// The caller validates `edge_length`.
    pub fn new(origin: Coord<f64>, edge_length: f64) -> Self {
        Self {
            origin,
            half_edge: edge_length / 2.0,
            half_row: 3.0_f64.sqrt() * edge_length / 2.0,
        }
    }

    /// Edge length of the hexagons on this lattice
    pub const fn edge_length(&self) -> f64 {
        self.half_edge * 2.0
    }

    /// Row pitch (`√3 × edge`)
    pub const fn row_height(&self) -> f64 {
        self.half_row * 2.0
    }

    /// Column pitch (`1.5 × edge`)
    pub const fn column_spacing(&self) -> f64 {
        self.half_edge * 3.0
    }

    /// Coordinate of lattice point `(k, j)`
    pub fn point(&self, k: i64, j: i64) -> Coord<f64> {
        Coord {
            x: (k as f64).mul_add(self.half_edge, self.origin.x),
            y: (j as f64).mul_add(self.half_row, self.origin.y),
        }
    }

    /// Lattice indices of the center of cell `(col, row)`
    ///
    /// Odd columns sit half a row higher than even ones.
    pub const fn center_index(col: usize, row: usize) -> (i64, i64) {
        (3 * col as i64, 2 * row as i64 + (col % 2) as i64)
    }
}

/// One hexagon of the grid, identified by its column and row
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    col: usize,
    row: usize,
    center: Coord<f64>,
    polygon: Polygon<f64>,
}

impl HexCell {
    /// Build cell `(col, row)` on `lattice`
    pub fn new(lattice: &HexLattice, col: usize, row: usize) -> Self {
        let (ck, cj) = HexLattice::center_index(col, row);
        let ring: Vec<Coord<f64>> = VERTEX_TEMPLATE
            .iter()
            .map(|&(dk, dj)| lattice.point(ck + dk, cj + dj))
            .collect();

        Self {
            col,
            row,
            center: lattice.point(ck, cj),
            // Polygon::new closes the ring
            polygon: Polygon::new(LineString::from(ring), vec![]),
        }
    }

    /// Grid column
    pub const fn column(&self) -> usize {
        self.col
    }

    /// Grid row
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Cell center
    pub const fn center(&self) -> Coord<f64> {
        self.center
    }

    /// Closed 7-point outline of the cell
    pub const fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }
}
