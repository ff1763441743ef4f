//! Field geometry
//!
//! The engine treats a field as an opaque spatial region. The observed
//! usage is a circular buffer around a point (field centre + radius),
//! which is what `FieldGeometry` models. Coordinates and radius are in
//! the same linear units as the raster's geotransform.

use geo_types::{Coord, Point};

/// A circular field region: centre point plus buffer radius.
///
/// Passed by reference into every sampling and labeling operation;
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGeometry {
    center: Point<f64>,
    radius: f64,
}

impl FieldGeometry {
    /// Create a field geometry from a centre point and buffer radius
    pub fn new(center: Point<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Create a field geometry from raw coordinates
    pub fn from_xy(x: f64, y: f64, radius: f64) -> Self {
        Self::new(Point::from(Coord { x, y }), radius)
    }

    /// Field centre
    pub fn center(&self) -> Point<f64> {
        self.center
    }

    /// Buffer radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether a geographic coordinate falls inside the field
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center.x();
        let dy = y - self.center.y();
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Bounding box as (min_x, min_y, max_x, max_y)
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        (
            self.center.x() - self.radius,
            self.center.y() - self.radius,
            self.center.x() + self.radius,
            self.center.y() + self.radius,
        )
    }
}
