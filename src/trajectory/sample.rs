//! Trajectory observations as delivered by the detection capability.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::trajectory::geometry::{NormalizedPoint, Point, Size};

/// One trajectory observation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrajectorySample {
    /// Points the detector actually observed, oldest first
    pub detected_points: Vec<NormalizedPoint>,
    /// Points the detector fitted onto its trajectory model, oldest first
    pub projected_points: Vec<NormalizedPoint>,
    /// Time span covered by the observation, in seconds
    pub duration: f64,
    /// Detector confidence in [0, 1]
    pub confidence: f32,
}

impl TrajectorySample {
    /// Create a sample from detected points only.
    pub fn new(detected_points: Vec<NormalizedPoint>, duration: f64, confidence: f32) -> Self {
        Self {
            detected_points,
            projected_points: Vec::new(),
            duration,
            confidence,
        }
    }

    /// Start building a sample.
    pub fn builder() -> SampleBuilder {
        SampleBuilder::new()
    }

    /// Normalized bounding size of the detected points.
    pub fn extent(&self) -> Size {
        extent(&self.detected_points)
    }
}

/// Width and height of the bounding box around `points`; zero when empty.
pub fn extent(points: &[NormalizedPoint]) -> Size {
    let Some(first) = points.first() else {
        return Size::default();
    };
    let (mut x1, mut y1, mut x2, mut y2) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        x1 = x1.min(p.x);
        y1 = y1.min(p.y);
        x2 = x2.max(p.x);
        y2 = y2.max(p.y);
    }
    Size::new(x2 - x1, y2 - y1)
}

/// Builder for `TrajectorySample`, mostly useful for adapters and tests.
#[derive(Debug, Clone, Default)]
pub struct SampleBuilder {
    detected: Vec<NormalizedPoint>,
    projected: Vec<NormalizedPoint>,
    duration: f64,
    confidence: f32,
}

impl SampleBuilder {
    /// Create a new sample builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one detected point.
    pub fn point(mut self, x: f64, y: f64) -> Self {
        self.detected.push(Point::new(x, y));
        self
    }

    /// Replace the detected points.
    pub fn points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.detected = points.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the projected points.
    pub fn projected<I>(mut self, points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        self.projected = points.into_iter().map(Into::into).collect();
        self
    }

    /// Set the covered time span in seconds.
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Set the confidence score.
    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Build the final `TrajectorySample`.
    pub fn build(self) -> TrajectorySample {
        TrajectorySample {
            detected_points: self.detected,
            projected_points: self.projected,
            duration: self.duration,
            confidence: self.confidence,
        }
    }
}
