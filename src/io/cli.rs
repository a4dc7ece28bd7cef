//! Command-line interface for converting a polygon dataset into a hex map

use crate::io::configuration::{
    DEFAULT_HEX_SIZE, DEFAULT_OBJECT_NAME, OUTPUT_EXTENSION, OUTPUT_SUFFIX, PipelineConfig,
};
use crate::io::crs::Crs;
use crate::io::error::Result;
use crate::io::progress::ProgressManager;
use crate::pipeline::{HexMapPipeline, RunSummary};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "hexmap")]
#[command(
    author,
    version,
    about = "Cover a polygon dataset with hexagons and write the joined cells as TopoJSON"
)]
/// Command-line arguments for the hex map tool
pub struct Cli {
    /// Input shapefile (.shp) or GeoJSON document
    #[arg(value_name = "SHAPEFILE")]
    pub input: PathBuf,

    /// Hexagon edge length in degrees
    #[arg(short = 's', long, default_value_t = DEFAULT_HEX_SIZE, allow_negative_numbers = true)]
    pub hex_size: f64,

    /// Output path (defaults to <input stem>_hex_map.topojson next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Coordinate reference of the input, overriding the one it declares
    #[arg(short = 'c', long, value_name = "CRS")]
    pub source_crs: Option<String>,

    /// Name of the object holding the joined cells
    #[arg(long, default_value = DEFAULT_OBJECT_NAME)]
    pub object_name: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pipeline settings described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the source reference cannot be parsed
    pub fn config(&self) -> Result<PipelineConfig> {
        let source_crs = self
            .source_crs
            .as_deref()
            .map(str::parse::<Crs>)
            .transpose()?;

        Ok(PipelineConfig {
            hex_size: self.hex_size,
            source_crs,
            object_name: self.object_name.clone(),
            ..PipelineConfig::default()
        })
    }

    /// Where the topology will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// Default output location for `input`: `<stem>_hex_map.topojson` beside it
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Runs one conversion described by the command line
pub struct MapProcessor {
    cli: Cli,
}

impl MapProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the conversion
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation or any pipeline stage fails
    pub fn process(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let output_path = self.cli.output_path();

        let mut pipeline = HexMapPipeline::new(self.cli.config()?);
        if self.cli.should_show_progress() {
            pipeline = pipeline.with_progress(ProgressManager::new());
        }

        let summary = pipeline.run(&self.cli.input, &output_path)?;

        info!(
            rows = summary.rows,
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "Hexagonal tile map with attributes saved as {}",
            output_path.display()
        );

        Ok(summary)
    }
}
