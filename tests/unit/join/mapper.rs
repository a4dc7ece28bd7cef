//! Tests for the R-tree backed spatial join

#[cfg(test)]
mod tests {
    use geo::{Intersects, MultiPolygon, Rect, coord};
    use hexmap::grid::{BoundingBox, HexGrid};
    use hexmap::io::source::{Attributes, SourceFeature};
    use hexmap::join::{join, join_with_progress};
    use serde_json::json;

    fn rect_feature(min: (f64, f64), max: (f64, f64), name: &str) -> SourceFeature {
        let rect = Rect::new(coord! { x: min.0, y: min.1 }, coord! { x: max.0, y: max.1 });
        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), json!(name));
        SourceFeature::new(MultiPolygon::new(vec![rect.to_polygon()]), attributes)
    }

    fn unit_grid() -> HexGrid {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0).expect("valid box");
        HexGrid::generate(bounds, 1.0).expect("valid grid")
    }

    // Tests one row per intersecting (cell, feature) pair
    // Verified by keeping only the first matching feature per cell
    #[test]
    fn test_row_count_sums_matches_per_cell() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0).expect("valid box");
        let grid = HexGrid::generate(bounds, 1.0).expect("valid grid");
        let features = vec![
            rect_feature((0.0, 0.0), (6.0, 6.0), "a"),
            rect_feature((4.0, 4.0), (10.0, 10.0), "b"),
            rect_feature((2.5, 7.5), (3.5, 8.5), "c"),
        ];

        let relation = join(&grid, &features);

        let expected: usize = grid
            .cells()
            .iter()
            .map(|cell| {
                features
                    .iter()
                    .filter(|feature| feature.geometry.intersects(cell.polygon()))
                    .count()
            })
            .sum();
        assert_eq!(relation.len(), expected);
        assert!(relation.matched_cells() < relation.len());
    }

    // Tests rows are ordered by cell then feature and reference real indices
    #[test]
    fn test_rows_are_ordered() {
        let bounds = BoundingBox::new(0.0, 0.0, 4.0, 4.0).expect("valid box");
        let grid = HexGrid::generate(bounds, 1.0).expect("valid grid");
        let features = vec![
            rect_feature((0.0, 0.0), (4.0, 4.0), "everything"),
            rect_feature((1.0, 1.0), (2.0, 2.0), "middle"),
        ];

        let relation = join(&grid, &features);
        let pairs = relation.pairs();

        assert!(pairs.windows(2).all(|w| w.first() < w.get(1)));
        assert!(pairs.iter().all(|p| p.cell < grid.len() && p.feature < features.len()));
    }

    // Tests a feature touching a cell at a single vertex still joins
    // Verified by replacing intersects with an interior overlap test
    #[test]
    fn test_single_point_touch_counts() {
        let grid = unit_grid();
        // Right edge of the square meets the west vertex of cell (0, 0) at (-1, 0)
        let features = vec![rect_feature((-2.0, -0.2), (-1.0, 0.2), "west")];

        let relation = join(&grid, &features);

        assert_eq!(relation.len(), 1);
        let pair = relation.pairs().first().expect("one pair");
        assert_eq!((pair.cell, pair.feature), (0, 0));
    }

    // Tests features outside the grid produce no rows
    #[test]
    fn test_disjoint_feature_matches_nothing() {
        let grid = unit_grid();
        let features = vec![rect_feature((50.0, 50.0), (51.0, 51.0), "far")];

        let relation = join(&grid, &features);

        assert!(relation.is_empty());
        assert_eq!(relation.matched_cells(), 0);
    }

    // Tests empty geometries are ignored rather than matched
    #[test]
    fn test_empty_geometry_is_ignored() {
        let grid = unit_grid();
        let features = vec![
            SourceFeature::new(MultiPolygon::new(vec![]), Attributes::new()),
            rect_feature((0.0, 0.0), (1.0, 1.0), "box"),
        ];

        let relation = join(&grid, &features);

        assert!(!relation.is_empty());
        assert!(relation.pairs().iter().all(|p| p.feature == 1));
    }

    // Tests the progress callback sees every cell once
    #[test]
    fn test_progress_reports_each_cell() {
        let grid = unit_grid();
        let features = vec![rect_feature((0.0, 0.0), (1.0, 1.0), "box")];

        let mut calls = 0;
        let with_progress = join_with_progress(&grid, &features, |_| calls += 1);

        assert_eq!(calls, grid.len());
        assert_eq!(with_progress, join(&grid, &features));
    }
}
