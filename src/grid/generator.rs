//! Grid layout and hexagon generation over a bounding box
//!
//! Cell `(0, 0)` is centered on the south-west corner of the box. Columns
//! advance by 1.5 edges and rows by √3 edges, with odd columns lifted half a
//! row. The layout takes the fewest columns and rows that leave no point of
//! the box uncovered; any cells spilling past the box edge are dropped later
//! by the spatial join.

use crate::grid::bounds::BoundingBox;
use crate::grid::hexagon::{HexCell, HexLattice};
use crate::io::error::{Result, invalid_parameter};
use geo::Coord;

// Largest allocation a `Vec` may hold
const MAX_GRID_BYTES: f64 = isize::MAX as f64;
const CELL_SIZE: f64 = std::mem::size_of::<HexCell>() as f64;

/// Check that `edge_length` can size a grid
///
/// # Errors
///
/// Returns an invalid parameter error unless the value is finite and positive
pub fn validate_edge_length(edge_length: f64) -> Result<()> {
    if edge_length.is_finite() && edge_length > 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(
            "hex_size",
            &edge_length,
            &"edge length must be a finite positive number",
        ))
    }
}

/// Dimensions of a hexagon grid covering a bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    bounds: BoundingBox,
    lattice: HexLattice,
    cols: usize,
    rows: usize,
}

impl GridLayout {
    /// Compute the layout for `bounds` and hexagons of side `edge_length`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the edge length is not a finite
    /// positive number, or the grid would not fit in memory addressing
    pub fn new(bounds: BoundingBox, edge_length: f64) -> Result<Self> {
        validate_edge_length(edge_length)?;

        let lattice = HexLattice::new(
            Coord {
                x: bounds.min_x(),
                y: bounds.min_y(),
            },
            edge_length,
        );

        // The last column's full-height strip must reach the east edge
        let east_reach = (bounds.width() - edge_length / 2.0).max(0.0);
        let cols = (east_reach / lattice.column_spacing()).ceil() + 1.0;

        // Between columns the outline zigzags, so full coverage ends half a
        // row below the top of the highest even-column cell
        let rows = (bounds.height() / lattice.row_height() + 0.5).ceil().max(1.0);

        // Counts stay in f64 until they are known to fit; an edge that
        // underflows the lattice pitch yields NaN or infinity here
        let cell_count = cols * rows;
        if !cell_count.is_finite() || cell_count * CELL_SIZE > MAX_GRID_BYTES {
            return Err(invalid_parameter(
                "hex_size",
                &edge_length,
                &format!("grid of {cols:e}x{rows:e} cells is too large"),
            ));
        }
        let cols = cols as usize;
        let rows = rows as usize;

        Ok(Self {
            bounds,
            lattice,
            cols,
            rows,
        })
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Box the layout covers
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Vertex lattice of the layout
    pub const fn lattice(&self) -> &HexLattice {
        &self.lattice
    }

    /// Build cell `(col, row)`
    pub fn cell(&self, col: usize, row: usize) -> HexCell {
        HexCell::new(&self.lattice, col, row)
    }

    /// Cells of one column, bottom to top
    pub fn column(&self, col: usize) -> impl Iterator<Item = HexCell> + '_ {
        (0..self.rows).map(move |row| self.cell(col, row))
    }
}

/// Ordered hexagon cells covering a bounding box
///
/// Cells are stored columns outer, rows inner; a cell's position in this
/// order is its grid index.
#[derive(Debug, Clone)]
pub struct HexGrid {
    layout: GridLayout,
    cells: Vec<HexCell>,
}

impl HexGrid {
    /// Generate the grid covering `bounds`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if `edge_length` is not positive
    pub fn generate(bounds: BoundingBox, edge_length: f64) -> Result<Self> {
        Self::generate_with_progress(bounds, edge_length, |_| {})
    }

    /// Generate the grid, calling `on_column` after each finished column
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if `edge_length` is not positive
    pub fn generate_with_progress(
        bounds: BoundingBox,
        edge_length: f64,
        on_column: impl FnMut(usize),
    ) -> Result<Self> {
        Ok(Self::from_layout(GridLayout::new(bounds, edge_length)?, on_column))
    }

    /// Generate every cell of `layout`, calling `on_column` after each
    /// finished column
    pub fn from_layout(layout: GridLayout, mut on_column: impl FnMut(usize)) -> Self {
        let mut cells = Vec::with_capacity(layout.cell_count());
        for col in 0..layout.cols() {
            cells.extend(layout.column(col));
            on_column(col);
        }

        Self { layout, cells }
    }

    /// Layout the grid was generated from
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// All cells in grid index order
    pub const fn cells(&self) -> &[HexCell] {
        self.cells.as_slice()
    }

    /// Cell with grid index `index`
    pub fn get(&self, index: usize) -> Option<&HexCell> {
        self.cells.get(index)
    }

    /// Number of cells
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
