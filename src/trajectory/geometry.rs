//! Point and size primitives shared by the region mapper and the path builder.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D point.
///
/// The same type carries both coordinate spaces used by the crate:
/// - normalized detector space: x, y in [0, 1], origin bottom-left
/// - view space: pixels/points, origin top-left
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (up in normalized space, down in view space)
    pub y: f64,
}

/// A point in normalized detector space (origin bottom-left).
pub type NormalizedPoint = Point;

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    /// Angle of the segment `self -> other` against the horizontal axis.
    #[inline]
    pub fn angle_from_horizontal(&self, other: &Point) -> f64 {
        angle_from_horizontal(*self, *other)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<nalgebra::Point2<f64>> for Point {
    fn from(p: nalgebra::Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Width and height of a view (or of anything measured in view units).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle in degrees between the horizontal axis and the segment `a -> b`.
///
/// The result is the absolute value of `atan2`, so it lies in [0, 180]
/// regardless of whether the y axis points up or down, and is rounded to
/// two decimal places.
pub fn angle_from_horizontal(a: Point, b: Point) -> f64 {
    let angle = (b.y - a.y).atan2(b.x - a.x);
    let degrees = angle.to_degrees().abs();
    (degrees * 100.0).round() / 100.0
}
