//! Axis-aligned bounding box in the target coordinate reference

use crate::io::error::{Result, invalid_parameter};
use geo::{Coord, Rect};

/// Axis-aligned bounding box with strictly positive width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box from its four extremes
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if any coordinate is not finite or
    /// the box has zero or negative width or height
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let value = format!("({min_x}, {min_y}, {max_x}, {max_y})");

        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(invalid_parameter(
                "bounding_box",
                &value,
                &"coordinates must be finite",
            ));
        }

        if min_x >= max_x || min_y >= max_y {
            return Err(invalid_parameter(
                "bounding_box",
                &value,
                &"bounding box is degenerate (zero width or height)",
            ));
        }

        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Create a bounding box from a `geo` rectangle
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the rectangle is degenerate
    pub fn from_rect(rect: Rect<f64>) -> Result<Self> {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Minimum x (west)
    pub const fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Minimum y (south)
    pub const fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Maximum x (east)
    pub const fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Maximum y (north)
    pub const fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Horizontal extent
    pub const fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent
    pub const fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point lies within the box, boundary included
    pub const fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Convert to a `geo` rectangle
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min_x,
                y: self.min_y,
            },
            Coord {
                x: self.max_x,
                y: self.max_y,
            },
        )
    }
}
