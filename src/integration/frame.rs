//! Frames handed over by the external frame supplier.

use std::time::Duration;

use crate::trajectory::AffineTransform;

/// Orientation correction the detector should apply to a frame.
///
/// Discriminants are the EXIF orientation values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up = 1,
    Down = 3,
    Right = 6,
    Left = 8,
}

impl Orientation {
    /// Map the rotation of a video track (already inverted) to an orientation.
    ///
    /// 0 keeps the frame upright, 180 turns it over, 90 and -90 rotate it onto
    /// its side. Any other angle is treated as upright.
    pub fn from_rotation_degrees(degrees: f64) -> Self {
        match degrees.round() as i64 {
            0 => Orientation::Up,
            180 | -180 => Orientation::Down,
            90 => Orientation::Left,
            -90 => Orientation::Right,
            _ => Orientation::Up,
        }
    }

    /// Orientation for a track whose display transform is `preferred`.
    ///
    /// A singular transform falls back to `Up`.
    pub fn from_preferred_transform(preferred: &AffineTransform) -> Self {
        preferred
            .inverse()
            .map(|inverse| Self::from_rotation_degrees(inverse.rotation_degrees()))
            .unwrap_or_default()
    }

    /// EXIF orientation value (1, 3, 6 or 8).
    pub fn exif_value(self) -> u32 {
        self as u32
    }
}

/// One decoded image frame with its timing.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Raw pixel bytes (format depends on the supplier)
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Presentation timestamp
    pub timestamp: Duration,
    /// Nominal frame duration of the source
    pub duration: Duration,
    /// Correction to apply before detection
    pub orientation: Orientation,
}

impl Frame {
    /// Create an upright frame with no nominal duration.
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp: Duration) -> Self {
        Self {
            data,
            width,
            height,
            timestamp,
            ..Default::default()
        }
    }

    /// Set the nominal frame duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the orientation correction.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_rotation() {
        assert_eq!(Orientation::from_rotation_degrees(0.0), Orientation::Up);
        assert_eq!(Orientation::from_rotation_degrees(180.0), Orientation::Down);
        assert_eq!(Orientation::from_rotation_degrees(-180.0), Orientation::Down);
        assert_eq!(Orientation::from_rotation_degrees(90.0), Orientation::Left);
        assert_eq!(Orientation::from_rotation_degrees(-90.0), Orientation::Right);
        assert_eq!(Orientation::from_rotation_degrees(45.0), Orientation::Up);
    }

    #[test]
    fn test_orientation_exif_values() {
        assert_eq!(Orientation::Up.exif_value(), 1);
        assert_eq!(Orientation::Down.exif_value(), 3);
        assert_eq!(Orientation::Right.exif_value(), 6);
        assert_eq!(Orientation::Left.exif_value(), 8);
    }

    #[test]
    fn test_orientation_from_preferred_transform() {
        // portrait recording: the track is displayed rotated by 90 degrees
        let portrait = AffineTransform::from_components(0.0, 1.0, -1.0, 0.0, 1080.0, 0.0);
        assert_eq!(Orientation::from_preferred_transform(&portrait), Orientation::Right);
        assert_eq!(
            Orientation::from_preferred_transform(&AffineTransform::identity()),
            Orientation::Up
        );
        assert_eq!(
            Orientation::from_preferred_transform(&AffineTransform::scale(0.0, 0.0)),
            Orientation::Up
        );
    }

    #[test]
    fn test_frame_builders() {
        let frame = Frame::new(vec![0; 4], 2, 2, Duration::from_millis(40))
            .with_duration(Duration::from_millis(33))
            .with_orientation(Orientation::Down);
        assert_eq!(frame.duration, Duration::from_millis(33));
        assert_eq!(frame.orientation, Orientation::Down);
    }
}
