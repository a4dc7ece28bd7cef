//! CLI entry point for hexagonal tile map generation

use clap::Parser;
use hexmap::io::cli::{Cli, MapProcessor};
use hexmap::io::logging::init_logging;

fn main() -> hexmap::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let processor = MapProcessor::new(cli);
    processor.process()?;
    Ok(())
}
