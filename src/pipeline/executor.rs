//! End-to-end hex map generation
//!
//! Reads the dataset, moves it into the target reference, covers its extent
//! with hexagons, joins attributes onto intersecting cells and writes the
//! result as a topology. Every stage runs to completion before the next
//! starts; the output file is only written once the whole document exists.

use crate::grid::{BoundingBox, GridLayout, HexGrid, validate_edge_length};
use crate::io::configuration::PipelineConfig;
use crate::io::error::Result;
use crate::io::output::write_topology;
use crate::io::progress::ProgressManager;
use crate::io::source::{SourceDataset, open_dataset, total_bounds};
use crate::join::{JoinRelation, join_with_progress};
use crate::topology::{Topology, to_feature_collection};
use std::path::Path;
use tracing::{debug, info, warn};

/// Counts describing one finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Features read from the dataset
    pub features: usize,
    /// Cells generated before the join
    pub cells_generated: usize,
    /// Distinct cells kept by the join
    pub cells_matched: usize,
    /// Joined rows written
    pub rows: usize,
    /// Shared arcs in the topology
    pub arcs: usize,
}

/// Runs the pipeline with one configuration
pub struct HexMapPipeline {
    config: PipelineConfig,
    progress: Option<ProgressManager>,
}

impl HexMapPipeline {
    /// Create a pipeline without progress display
    pub const fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Report stage progress through `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Configuration in use
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Convert the dataset at `input` and write the topology to `output`
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage; no output is written in that case
    pub fn run(&mut self, input: &Path, output: &Path) -> Result<RunSummary> {
        validate_edge_length(self.config.hex_size)?;

        let dataset = open_dataset(input)?;
        info!(path = %input.display(), features = dataset.len(), "dataset loaded");

        let (topology, summary) = self.build_topology(dataset)?;
        write_topology(output, &topology)?;

        if let Some(ref mut pm) = self.progress {
            pm.finish();
        }

        Ok(summary)
    }

    /// Turn an in-memory dataset into a topology
    ///
    /// An empty dataset yields an empty topology.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error for a bad edge length or a
    /// degenerate extent, a reprojection error if the dataset cannot be moved
    /// into the target reference, and a serialization error if encoding fails
    pub fn build_topology(&mut self, dataset: SourceDataset) -> Result<(Topology, RunSummary)> {
        validate_edge_length(self.config.hex_size)?;

        let mut summary = RunSummary {
            features: dataset.len(),
            ..RunSummary::default()
        };

        if dataset.is_empty() {
            warn!("dataset has no features; writing an empty topology");
            return Ok((self.empty_topology()?, summary));
        }

        let dataset =
            dataset.reproject(self.config.source_crs.as_ref(), &self.config.target_crs)?;

        let grid = match total_bounds(&dataset.features) {
            Some(rect) => self.generate_grid(BoundingBox::from_rect(rect)?)?,
            None => {
                warn!("features have no coordinates; writing an empty topology");
                return Ok((self.empty_topology()?, summary));
            }
        };
        summary.cells_generated = grid.len();

        let relation = self.join_grid(&grid, &dataset);
        summary.rows = relation.len();
        summary.cells_matched = relation.matched_cells();

        let collection = to_feature_collection(relation.rows(&grid, &dataset.features));
        let topology = Topology::from_feature_collection(&collection, &self.config.object_name)?;
        summary.arcs = topology.arcs.len();

        info!(
            cells = summary.cells_matched,
            rows = summary.rows,
            arcs = summary.arcs,
            "topology built"
        );

        Ok((topology, summary))
    }

    fn empty_topology(&self) -> Result<Topology> {
        Topology::from_feature_collection(
            &to_feature_collection(std::iter::empty()),
            &self.config.object_name,
        )
    }

    fn generate_grid(&mut self, bounds: BoundingBox) -> Result<HexGrid> {
        debug!(
            min_x = bounds.min_x(),
            min_y = bounds.min_y(),
            max_x = bounds.max_x(),
            max_y = bounds.max_y(),
            hex_size = self.config.hex_size,
            "generating grid"
        );

        let layout = GridLayout::new(bounds, self.config.hex_size)?;
        let grid = match self.progress {
            Some(ref mut pm) => {
                pm.start_stage("Generating hexagons", layout.cols());
                let grid = HexGrid::from_layout(layout, |_| pm.advance());
                pm.finish_stage();
                grid
            }
            None => HexGrid::from_layout(layout, |_| {}),
        };

        info!(
            cols = grid.layout().cols(),
            rows = grid.layout().rows(),
            cells = grid.len(),
            "grid generated"
        );
        Ok(grid)
    }

    fn join_grid(&mut self, grid: &HexGrid, dataset: &SourceDataset) -> JoinRelation {
        match self.progress {
            Some(ref mut pm) => {
                pm.start_stage("Joining attributes", grid.len());
                let relation = join_with_progress(grid, &dataset.features, |_| pm.advance());
                pm.finish_stage();
                relation
            }
            None => join_with_progress(grid, &dataset.features, |_| {}),
        }
    }
}

/// Convert the dataset at `input` with hexagons of side `hex_size` and write
/// the topology to `output`, using defaults for everything else
///
/// # Errors
///
/// Returns the first error of any stage
pub fn generate_hex_map(input: &Path, hex_size: f64, output: &Path) -> Result<RunSummary> {
    HexMapPipeline::new(PipelineConfig::with_hex_size(hex_size)).run(input, output)
}
