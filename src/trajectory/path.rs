//! Screen-space trajectory polyline and the projection that builds it.

use crate::trajectory::geometry::{NormalizedPoint, Point, Size};
use crate::trajectory::region::{RegionOfInterest, ViewRect};
use crate::trajectory::transform::AffineTransform;

/// Ordered view-space vertices of a trajectory polyline.
///
/// The first vertex is the move-to, every following vertex a line-to. A
/// path with a single vertex is a degenerate point and is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenPath {
    vertices: Vec<Point>,
}

impl ScreenPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from vertices in drawing order.
    pub fn from_vertices(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Get the vertices in drawing order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A single vertex: draw as a dot rather than a line.
    pub fn is_point(&self) -> bool {
        self.vertices.len() == 1
    }

    /// The move-to vertex.
    pub fn first(&self) -> Option<Point> {
        self.vertices.first().copied()
    }

    /// The most recent vertex.
    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    /// Line segments between consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    /// Cumulative length of the polyline.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(&b)).sum()
    }

    /// Whether the trajectory travels left to right on screen.
    pub fn is_moving_forward(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.len() > 1 => last.x > first.x,
            _ => false,
        }
    }

    /// Smallest view rectangle containing every vertex.
    pub fn bounding_rect(&self) -> Option<ViewRect> {
        let first = self.first()?;
        let (mut x1, mut y1, mut x2, mut y2) = (first.x, first.y, first.x, first.y);
        for p in &self.vertices[1..] {
            x1 = x1.min(p.x);
            y1 = y1.min(p.y);
            x2 = x2.max(p.x);
            y2 = y2.max(p.y);
        }
        Some(ViewRect::from_tlbr(x1, y1, x2, y2))
    }
}

/// Transform taking bottom-left normalized points into view space, bounded by `roi`.
pub fn projection_transform(roi: &RegionOfInterest, bounds: Size) -> AffineTransform {
    AffineTransform::vertical_flip()
        .then(&AffineTransform::scale(
            roi.width() * bounds.width,
            roi.height() * bounds.height,
        ))
        .then(&AffineTransform::translation(
            roi.min_x() * bounds.width,
            (1.0 - roi.max_y()) * bounds.height,
        ))
}

/// Project normalized detector points into a fresh view-space path.
///
/// Points are interpreted relative to `roi`: the unit square is flipped to
/// a top-left origin, stretched over the region's extent in the view and
/// moved to the region's view-space origin.
///
/// # Arguments
/// * `points` - Detected points, oldest first, bottom-left origin
/// * `roi` - Region of interest the detector ran on
/// * `bounds` - Current size of the overlay view
///
/// # Returns
/// A path with one vertex per input point; empty when `points` is empty.
pub fn project(points: &[NormalizedPoint], roi: &RegionOfInterest, bounds: Size) -> ScreenPath {
    if points.is_empty() {
        return ScreenPath::new();
    }
    ScreenPath::from_vertices(projection_transform(roi, bounds).apply_all(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demo_region() -> RegionOfInterest {
        RegionOfInterest::new(0.3, 0.25, 0.5, 0.5).unwrap()
    }

    #[test]
    fn test_project_empty() {
        let path = project(&[], &demo_region(), Size::new(100.0, 100.0));
        assert!(path.is_empty());
        assert_eq!(path.length(), 0.0);
        assert!(path.bounding_rect().is_none());
    }

    #[test]
    fn test_project_closed_form() {
        let (w, h) = (400.0, 800.0);
        let points = [Point::new(0.1, 0.1), Point::new(0.5, 0.5)];
        let path = project(&points, &demo_region(), Size::new(w, h));
        assert_eq!(path.len(), 2);

        let v = path.vertices();
        // x = px * 0.5W + 0.3W, y = (1 - py) * 0.5H + 0.25H
        assert_relative_eq!(v[0].x, 0.35 * w, epsilon = 1e-9);
        assert_relative_eq!(v[0].y, 0.70 * h, epsilon = 1e-9);
        assert_relative_eq!(v[1].x, 0.55 * w, epsilon = 1e-9);
        assert_relative_eq!(v[1].y, 0.50 * h, epsilon = 1e-9);
    }

    #[test]
    fn test_project_unit_corners_land_on_region() {
        let bounds = Size::new(640.0, 480.0);
        let roi = demo_region();
        let rect = roi.to_view_rect(bounds);
        let path = project(
            &[Point::new(0.0, 1.0), Point::new(1.0, 0.0)],
            &roi,
            bounds,
        );
        let [tl, br] = [path.vertices()[0], path.vertices()[1]];
        assert_relative_eq!(tl.x, rect.x, epsilon = 1e-9);
        assert_relative_eq!(tl.y, rect.y, epsilon = 1e-9);
        assert_relative_eq!(br.x, rect.x + rect.width, epsilon = 1e-9);
        assert_relative_eq!(br.y, rect.y + rect.height, epsilon = 1e-9);
    }

    #[test]
    fn test_project_single_point() {
        let path = project(
            &[Point::new(0.5, 0.5)],
            &RegionOfInterest::full(),
            Size::new(200.0, 100.0),
        );
        assert!(path.is_point());
        assert_eq!(path.segments().count(), 0);
        assert_eq!(path.length(), 0.0);
        assert!(!path.is_moving_forward());
        let rect = path.bounding_rect().unwrap();
        assert_eq!((rect.width, rect.height), (0.0, 0.0));
        assert_relative_eq!(rect.x, 100.0);
        assert_relative_eq!(rect.y, 50.0);
    }

    #[test]
    fn test_length_and_direction() {
        let path = ScreenPath::from_vertices(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 8.0),
        ]);
        assert_relative_eq!(path.length(), 10.0);
        assert!(path.is_moving_forward());

        let backwards = ScreenPath::from_vertices(vec![Point::new(6.0, 0.0), Point::new(0.0, 0.0)]);
        assert!(!backwards.is_moving_forward());
    }

    #[test]
    fn test_project_preserves_order() {
        let points: Vec<Point> = (0..15).map(|i| Point::new(i as f64 / 14.0, 0.5)).collect();
        let path = project(&points, &RegionOfInterest::full(), Size::new(140.0, 10.0));
        assert_eq!(path.len(), 15);
        for (i, v) in path.vertices().iter().enumerate() {
            assert_relative_eq!(v.x, i as f64 * 10.0, epsilon = 1e-9);
        }
    }
}
