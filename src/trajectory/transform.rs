//! 2D affine transforms in homogeneous coordinates.

use nalgebra::{Matrix3, Point2};
use ndarray::{Array2, Axis};

use crate::trajectory::geometry::Point;

/// Affine transform stored as a 3x3 homogeneous matrix acting on column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3<f64>,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    /// The transform that leaves every point in place.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Scale about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            matrix: Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Shift by `(tx, ty)`.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            matrix: Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            matrix: Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Build from the `a, b, c, d, tx, ty` components used by 2D graphics APIs,
    /// where `x' = a*x + c*y + tx` and `y' = b*x + d*y + ty`.
    pub fn from_components(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            matrix: Matrix3::new(a, c, tx, b, d, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Flip the unit square upside down: `y -> 1 - y`.
    ///
    /// Equivalent to translating y by -1 and then scaling y by -1, which
    /// moves bottom-left-origin normalized points into top-left-origin
    /// normalized space.
    pub fn vertical_flip() -> Self {
        Self::translation(0.0, -1.0).then(&Self::scale(1.0, -1.0))
    }

    /// Compose so that `self` is applied first and `next` second.
    pub fn then(&self, next: &AffineTransform) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Rotation encoded in the linear part, in degrees (-180, 180].
    pub fn rotation_degrees(&self) -> f64 {
        self.matrix[(1, 0)].atan2(self.matrix[(0, 0)]).to_degrees()
    }

    /// Get a reference to the homogeneous matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Transform a single point.
    pub fn apply(&self, point: Point) -> Point {
        self.matrix
            .transform_point(&Point2::new(point.x, point.y))
            .into()
    }

    /// Transform a batch of points in one matrix product.
    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        if points.is_empty() {
            return Vec::new();
        }
        // rows are homogeneous points, so multiply by the transposed matrix
        let homogeneous = Array2::from_shape_fn((points.len(), 3), |(i, j)| match j {
            0 => points[i].x,
            1 => points[i].y,
            _ => 1.0,
        });
        let transposed = Array2::from_shape_fn((3, 3), |(i, j)| self.matrix[(j, i)]);
        homogeneous
            .dot(&transposed)
            .axis_iter(Axis(0))
            .map(|row| Point::new(row[0], row[1]))
            .collect()
    }
}
