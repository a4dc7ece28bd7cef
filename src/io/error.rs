//! Error types for every stage of the hex map pipeline

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pipeline operations
#[derive(Debug)]
pub enum HexMapError {
    /// Caller supplied a value the pipeline cannot work with
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source dataset is missing, unreadable, or holds unsupported data
    SourceRead {
        /// Path of the dataset
        path: PathBuf,
        /// Description of what went wrong
        reason: String,
    },

    /// Shapefile bundle could not be decoded
    Shapefile {
        /// Path of the `.shp` file
        path: PathBuf,
        /// Underlying shapefile reader error
        source: Box<shapefile::Error>,
    },

    /// GeoJSON document could not be parsed
    GeoJson {
        /// Path of the document
        path: PathBuf,
        /// Underlying parser error
        source: Box<geojson::Error>,
    },

    /// Source coordinate reference is missing or cannot be converted
    Reprojection {
        /// Textual form of the reference involved
        crs: String,
        /// Description of the failure
        reason: String,
    },

    /// Joined rows cannot be encoded as a topology
    Serialization {
        /// Description of the failure
        reason: String,
    },

    /// Topology document could not be encoded as JSON
    Json {
        /// Underlying encoder error
        source: serde_json::Error,
    },

    /// Output document could not be written
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Coarse classification of [`HexMapError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-positive edge length, degenerate bounding box, bad option value
    InvalidParameter,
    /// Source dataset missing, unreadable, or unsupported
    SourceRead,
    /// Coordinate reference missing or not convertible
    Reprojection,
    /// Rows cannot be encoded into the shared-topology format
    Serialization,
    /// Destination not writable
    Write,
}

impl HexMapError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::SourceRead { .. } | Self::Shapefile { .. } | Self::GeoJson { .. } => {
                ErrorKind::SourceRead
            }
            Self::Reprojection { .. } => ErrorKind::Reprojection,
            Self::Serialization { .. } | Self::Json { .. } => ErrorKind::Serialization,
            Self::Write { .. } => ErrorKind::Write,
        }
    }
}

impl fmt::Display for HexMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::SourceRead { path, reason } => {
                write!(f, "Failed to read dataset '{}': {reason}", path.display())
            }
            Self::Shapefile { path, source } => {
                write!(f, "Failed to read shapefile '{}': {source}", path.display())
            }
            Self::GeoJson { path, source } => {
                write!(f, "Failed to parse GeoJSON '{}': {source}", path.display())
            }
            Self::Reprojection { crs, reason } => {
                write!(f, "Cannot reproject from '{crs}': {reason}")
            }
            Self::Serialization { reason } => {
                write!(f, "Failed to build topology: {reason}")
            }
            Self::Json { source } => {
                write!(f, "Failed to encode topology as JSON: {source}")
            }
            Self::Write { path, source } => {
                write!(f, "Failed to write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for HexMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shapefile { source, .. } => Some(source.as_ref()),
            Self::GeoJson { source, .. } => Some(source.as_ref()),
            Self::Json { source } => Some(source),
            Self::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HexMapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json { source: err }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, HexMapError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> HexMapError {
    HexMapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a source read error for the dataset at `path`
pub fn source_read_error(path: impl Into<PathBuf>, reason: &impl ToString) -> HexMapError {
    HexMapError::SourceRead {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Create a reprojection error for the reference `crs`
pub fn reprojection_error(crs: &impl ToString, reason: &impl ToString) -> HexMapError {
    HexMapError::Reprojection {
        crs: crs.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a topology serialization error
pub fn serialization_error(reason: &impl ToString) -> HexMapError {
    HexMapError::Serialization {
        reason: reason.to_string(),
    }
}

