//! Writing the topology document

use crate::io::error::{HexMapError, Result, source_read_error};
use crate::topology::Topology;
use std::path::Path;

/// Encode `topology` as compact JSON
///
/// # Errors
///
/// Returns a serialization error if encoding fails
pub fn encode_topology(topology: &Topology) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(topology)?)
}

/// Write `topology` to `path`, replacing any existing file
///
/// The document is fully encoded before the file is touched, so an encoding
/// failure leaves no output behind.
///
/// # Errors
///
/// Returns a serialization error if encoding fails, or a write error if the
/// destination cannot be written
pub fn write_topology(path: &Path, topology: &Topology) -> Result<()> {
    let bytes = encode_topology(topology)?;
    std::fs::write(path, bytes).map_err(|source| HexMapError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a topology document back from `path`
///
/// # Errors
///
/// Returns a source read error if the file cannot be opened, or a
/// serialization error if it is not a valid topology
pub fn read_topology(path: &Path) -> Result<Topology> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| source_read_error(path, &e))?;
    Ok(serde_json::from_str(&text)?)
}
