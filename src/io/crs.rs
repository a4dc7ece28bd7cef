//! Coordinate reference resolution and reprojection
//!
//! References are either EPSG codes or PROJ.4 definition strings. Shapefile
//! `.prj` sidecars carry WKT, which is resolved to an EPSG code through its
//! `AUTHORITY` clause or, for ESRI-flavoured WKT without one, through a short
//! table of well-known projection names.

use crate::io::error::{Result, invalid_parameter, reprojection_error};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::proj::Proj;
use std::fmt;
use std::str::FromStr;

/// A coordinate reference system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crs {
    /// Registered EPSG code
    Epsg(u16),
    /// PROJ.4 definition string (`+proj=...`)
    Proj(String),
}

/// ESRI WKT names that appear without an `AUTHORITY` clause
const ESRI_NAMES: &[(&str, u16)] = &[
    ("WGS_1984_Web_Mercator_Auxiliary_Sphere", 3857),
    ("British_National_Grid", 27700),
    ("GCS_WGS_1984", 4326),
];

impl Crs {
    /// Resolve the reference described by `.prj` WKT text
    ///
    /// # Errors
    ///
    /// Returns a reprojection error if the text names no known reference
    pub fn from_wkt(wkt: &str) -> Result<Self> {
        if let Some(code) = last_epsg_authority(wkt) {
            return Ok(Self::Epsg(code));
        }

        // PROJCS names come first in the text, so the projected name wins over
        // the embedded GEOGCS
        let head = wkt.trim_start();
        if head.starts_with("PROJCS") {
            if let Some(&(_, code)) = ESRI_NAMES
                .iter()
                .find(|(name, _)| !name.starts_with("GCS_") && wkt.contains(name))
            {
                return Ok(Self::Epsg(code));
            }
        } else if head.starts_with("GEOGCS")
            && (wkt.contains("GCS_WGS_1984") || wkt.contains("\"WGS 84\""))
        {
            return Ok(Self::Epsg(4326));
        }

        Err(reprojection_error(
            &first_line(wkt),
            &"unrecognised projection WKT; pass --source-crs explicitly",
        ))
    }

    fn to_proj(&self) -> Result<Proj> {
        match self {
            Self::Epsg(code) => {
                Proj::from_epsg_code(*code).map_err(|e| reprojection_error(self, &e))
            }
            Self::Proj(definition) => {
                Proj::from_proj_string(definition).map_err(|e| reprojection_error(self, &e))
            }
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epsg(code) => write!(f, "EPSG:{code}"),
            Self::Proj(definition) => f.write_str(definition),
        }
    }
}

impl FromStr for Crs {
    type Err = crate::io::error::HexMapError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with('+') {
            return Ok(Self::Proj(trimmed.to_string()));
        }

        let code = trimmed
            .strip_prefix("EPSG:")
            .or_else(|| trimmed.strip_prefix("epsg:"))
            .unwrap_or(trimmed);
        code.parse::<u16>().map(Self::Epsg).map_err(|e| {
            invalid_parameter(
                "source_crs",
                &trimmed,
                &format!("expected EPSG:<code> or a +proj definition ({e})"),
            )
        })
    }
}

fn last_epsg_authority(wkt: &str) -> Option<u16> {
    let compact: String = wkt.chars().filter(|c| !c.is_whitespace()).collect();
    let marker = "AUTHORITY[\"EPSG\",";
    let start = compact.rfind(marker)? + marker.len();
    let digits: String = compact
        .get(start..)?
        .chars()
        .skip_while(|c| *c == '"')
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().chars().take(60).collect()
}

/// Transforms geometries between two references
///
/// Holds no projections when source and target are equal, so coordinates
/// already in the target reference pass through untouched.
#[derive(Debug)]
pub struct Reprojector {
    source: Crs,
    target: Crs,
    projections: Option<(Proj, Proj)>,
}

impl Reprojector {
    /// Build a reprojector from `source` to `target`
    ///
    /// # Errors
    ///
    /// Returns a reprojection error if either reference is unknown to the
    /// projection library
    pub fn new(source: &Crs, target: &Crs) -> Result<Self> {
        let projections = if source == target {
            None
        } else {
            Some((source.to_proj()?, target.to_proj()?))
        };

        Ok(Self {
            source: source.clone(),
            target: target.clone(),
            projections,
        })
    }

    /// Whether this reprojector leaves coordinates unchanged
    pub const fn is_identity(&self) -> bool {
        self.projections.is_none()
    }

    /// Reference the reprojector reads from
    pub const fn source(&self) -> &Crs {
        &self.source
    }

    /// Reference the reprojector writes to
    pub const fn target(&self) -> &Crs {
        &self.target
    }

    /// Transform a single coordinate
    ///
    /// Angular coordinates are exchanged in degrees; the projection library
    /// works in radians.
    ///
    /// # Errors
    ///
    /// Returns a reprojection error if the transform fails or leaves the
    /// valid numeric range
    pub fn transform_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let Some((from, to)) = &self.projections else {
            return Ok(coord);
        };

        let mut point = if from.is_latlong() {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };

        proj4rs::transform::transform(from, to, &mut point)
            .map_err(|e| reprojection_error(&self.source, &e))?;

        let (x, y) = if to.is_latlong() {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };

        if !x.is_finite() || !y.is_finite() {
            return Err(reprojection_error(
                &self.source,
                &format!("coordinate ({}, {}) has no image in {}", coord.x, coord.y, self.target),
            ));
        }

        Ok(Coord { x, y })
    }

    /// Transform every coordinate of a geometry
    ///
    /// # Errors
    ///
    /// Returns the first coordinate transform error encountered
    pub fn reproject(&self, geometry: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        if self.is_identity() {
            return Ok(geometry.clone());
        }
        geometry.try_map_coords(|coord| self.transform_coord(coord))
    }
}
