//! Tests for grid layout, coverage, and generation order

#[cfg(test)]
mod tests {
    use geo::{Intersects, Point, Relate};
    use hexmap::grid::{BoundingBox, GridLayout, HexGrid, validate_edge_length};
    use hexmap::io::error::ErrorKind;

    fn square(size: f64) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, size, size).expect("valid box")
    }

    fn assert_covers(grid: &HexGrid, bounds: &BoundingBox, samples: usize) {
        for i in 0..=samples {
            for j in 0..=samples {
                let x = bounds.min_x() + bounds.width() * i as f64 / samples as f64;
                let y = bounds.min_y() + bounds.height() * j as f64 / samples as f64;
                let point = Point::new(x, y);
                assert!(
                    grid.cells().iter().any(|cell| cell.polygon().intersects(&point)),
                    "point ({x}, {y}) is not covered"
                );
            }
        }
    }

    // Tests the documented 10x10 box with edge 5 yields a 2x2 grid
    // Verified by dropping the +1 from the column count
    #[test]
    fn test_ten_by_ten_with_edge_five_has_four_cells() {
        let grid = HexGrid::generate(square(10.0), 5.0).expect("valid grid");

        assert_eq!(grid.layout().cols(), 2);
        assert_eq!(grid.layout().rows(), 2);
        assert_eq!(grid.len(), 4);
        assert!(!grid.is_empty());
    }

    // Tests non-positive and non-finite edge lengths fail before generation
    // Verified by accepting zero in validation
    #[test]
    fn test_invalid_edge_length() {
        for edge in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = HexGrid::generate(square(10.0), edge).expect_err("edge must be rejected");
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
            assert!(err.to_string().contains("hex_size"));
            assert!(validate_edge_length(edge).is_err());
        }

        assert!(validate_edge_length(0.05).is_ok());
    }

    // Tests every sampled point of the box lies in some cell
    // Verified by removing the half-row term from the row count
    #[test]
    fn test_grid_covers_square_box() {
        for edge in [5.0, 1.3, 0.7] {
            let bounds = square(10.0);
            let grid = HexGrid::generate(bounds, edge).expect("valid grid");
            assert_covers(&grid, &bounds, 40);
        }
    }

    // Tests coverage of wide and tall boxes
    // Verified by using the box width over twice the edge as the column count
    #[test]
    fn test_grid_covers_elongated_boxes() {
        let wide = BoundingBox::new(0.0, 0.0, 100.0, 3.0).expect("valid box");
        let wide_grid = HexGrid::generate(wide, 5.0).expect("valid grid");
        assert_eq!(wide_grid.layout().cols(), 14);
        assert_eq!(wide_grid.layout().rows(), 1);
        assert_covers(&wide_grid, &wide, 200);

        let tall = BoundingBox::new(-1.0, -50.0, 1.0, 50.0).expect("valid box");
        let tall_grid = HexGrid::generate(tall, 2.0).expect("valid grid");
        assert_covers(&tall_grid, &tall, 200);
    }

    // Tests a box much smaller than one cell still gets a cell
    #[test]
    fn test_tiny_box_yields_one_cell() {
        let bounds = BoundingBox::new(3.0, 4.0, 3.001, 4.001).expect("valid box");
        let grid = HexGrid::generate(bounds, 1.0).expect("valid grid");

        assert_eq!(grid.len(), 1);
        assert_covers(&grid, &bounds, 4);
    }

    // Tests neighbours share an edge and no two cells overlap
    // Verified by offsetting even columns instead of odd ones
    #[test]
    fn test_cells_touch_without_overlap() {
        let grid = HexGrid::generate(square(6.0), 1.5).expect("valid grid");
        let cells = grid.cells();

        for (i, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(i + 1) {
                let matrix = a.polygon().relate(b.polygon());
                assert!(
                    !matrix.is_intersects() || matrix.is_touches(),
                    "cells ({}, {}) and ({}, {}) overlap",
                    a.column(),
                    a.row(),
                    b.column(),
                    b.row()
                );
            }
        }

        let rows = grid.layout().rows();
        let below = grid.get(0).expect("cell (0, 0)");
        let above = grid.get(1).expect("cell (0, 1)");
        let beside = grid.get(rows).expect("cell (1, 0)");
        assert!(below.polygon().relate(above.polygon()).is_touches());
        assert!(below.polygon().relate(beside.polygon()).is_touches());
    }

    // Tests neighbouring cells produce bit-identical shared vertices
    #[test]
    fn test_shared_vertices_are_identical() {
        let bounds = BoundingBox::new(0.1, 0.2, 7.3, 5.9).expect("valid box");
        let grid = HexGrid::generate(bounds, 0.9).expect("valid grid");
        let rows = grid.layout().rows();

        let left = grid.get(0).expect("cell (0, 0)");
        let right = grid.get(rows).expect("cell (1, 0)");

        let shared = left
            .polygon()
            .exterior()
            .coords()
            .take(6)
            .filter(|a| right.polygon().exterior().coords().any(|b| *a == b))
            .count();
        assert_eq!(shared, 2);
    }

    // Tests cells are ordered columns outer, rows inner
    // Verified by swapping loop order
    #[test]
    fn test_generation_order() {
        let grid = HexGrid::generate(square(10.0), 1.0).expect("valid grid");
        let rows = grid.layout().rows();

        for (index, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.column(), index / rows);
            assert_eq!(cell.row(), index % rows);
        }
    }

    // Tests two runs produce identical grids
    #[test]
    fn test_generation_is_deterministic() {
        let bounds = BoundingBox::new(-12.5, 33.1, 4.25, 41.0).expect("valid box");
        let first = HexGrid::generate(bounds, 0.37).expect("valid grid");
        let second = HexGrid::generate(bounds, 0.37).expect("valid grid");

        assert_eq!(first.cells(), second.cells());
    }

    // Tests the progress callback fires once per column in order
    #[test]
    fn test_progress_reports_each_column() {
        let mut seen = Vec::new();
        let grid = HexGrid::generate_with_progress(square(10.0), 2.0, |col| seen.push(col))
            .expect("valid grid");

        let expected: Vec<usize> = (0..grid.layout().cols()).collect();
        assert_eq!(seen, expected);
    }

    // Tests layout accessors agree with the generated grid
    #[test]
    fn test_layout_matches_grid() {
        let bounds = square(10.0);
        let layout = GridLayout::new(bounds, 2.0).expect("valid layout");
        let grid = HexGrid::generate(bounds, 2.0).expect("valid grid");

        assert_eq!(layout.cell_count(), grid.len());
        assert_eq!(layout.bounds(), &bounds);
        assert!((layout.lattice().edge_length() - 2.0).abs() < 1e-12);
        assert_eq!(layout.column(1).count(), layout.rows());
        assert_eq!(layout.cell(1, 2), *grid.get(layout.rows() + 2).expect("cell (1, 2)"));
    }

    // Tests an edge so small the column count exceeds usize is rejected
    // Verified by casting the counts to usize before checking them
    #[test]
    fn test_vanishing_edge_is_too_large() {
        let err = GridLayout::new(square(10.0), 1e-300).expect_err("grid too large");

        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.to_string().contains("too large"));
        assert!(HexGrid::generate(square(10.0), 1e-300).is_err());
    }

    // Tests counts that fit on their own but not as a product are rejected
    #[test]
    fn test_cell_count_overflow_is_rejected() {
        let err = GridLayout::new(square(10.0), 1e-9).expect_err("grid too large");

        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    // Tests a subnormal edge whose lattice pitch underflows to zero
    #[test]
    fn test_subnormal_edge_is_rejected() {
        let err = GridLayout::new(square(10.0), f64::from_bits(1)).expect_err("degenerate pitch");

        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    // Tests building from a precomputed layout matches direct generation
    #[test]
    fn test_from_layout_matches_generate() {
        let bounds = square(10.0);
        let layout = GridLayout::new(bounds, 1.5).expect("valid layout");

        let mut columns = 0;
        let grid = HexGrid::from_layout(layout, |_| columns += 1);

        assert_eq!(columns, layout.cols());
        assert_eq!(grid.layout(), &layout);
        let direct = HexGrid::generate(bounds, 1.5).expect("valid grid");
        assert_eq!(grid.cells(), direct.cells());
    }
}
