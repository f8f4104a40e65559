//! Region-of-interest mapping between normalized detector space and view space.
//!
//! The detector reports geometry with a bottom-left origin, while views lay
//! out from the top-left. A `RegionOfInterest` is always stored normalized
//! and mapped to a `ViewRect` on demand, so nothing has to be recomputed
//! when the view is resized.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::trajectory::geometry::Size;

/// Slack allowed on the `<= 1` edge checks.
const EDGE_EPSILON: f64 = 1e-9;

/// Errors raised when constructing a region of interest.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegionError {
    #[error("region components must be finite")]
    NonFinite,
    #[error("region origin ({min_x}, {min_y}) must not be negative")]
    NegativeOrigin { min_x: f64, min_y: f64 },
    #[error("region size {width}x{height} must not be negative")]
    NegativeSize { width: f64, height: f64 },
    #[error("region extends past the unit square (max_x={max_x}, max_y={max_y})")]
    OutOfBounds { max_x: f64, max_y: f64 },
    #[error("view bounds {width}x{height} have no area")]
    EmptyBounds { width: f64, height: f64 },
}

/// Normalized sub-rectangle of the frame in which trajectories are detected.
///
/// Coordinates follow the detector convention: origin bottom-left, so
/// `min_y` is the bottom edge and `max_y()` the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionOfInterest {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

impl Default for RegionOfInterest {
    fn default() -> Self {
        Self::full()
    }
}

impl RegionOfInterest {
    /// Create a region from its bottom-left corner and size.
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Result<Self, RegionError> {
        if ![min_x, min_y, width, height].iter().all(|v| v.is_finite()) {
            return Err(RegionError::NonFinite);
        }
        if min_x < 0.0 || min_y < 0.0 {
            return Err(RegionError::NegativeOrigin { min_x, min_y });
        }
        if width < 0.0 || height < 0.0 {
            return Err(RegionError::NegativeSize { width, height });
        }
        let (max_x, max_y) = (min_x + width, min_y + height);
        if max_x > 1.0 + EDGE_EPSILON || max_y > 1.0 + EDGE_EPSILON {
            return Err(RegionError::OutOfBounds { max_x, max_y });
        }
        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// The whole frame.
    #[inline]
    pub const fn full() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Left edge.
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Bottom edge.
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Normalized width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Normalized height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    /// Top edge.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// Map the region into a view of the given size (top-left origin).
    ///
    /// Derived only from the region and `bounds`, so calling it again after a
    /// resize gives the correctly placed rectangle.
    pub fn to_view_rect(&self, bounds: Size) -> ViewRect {
        ViewRect::new(
            self.min_x * bounds.width,
            (1.0 - self.max_y()) * bounds.height,
            self.width * bounds.width,
            self.height * bounds.height,
        )
    }

    /// Recover the normalized region from a view-space rectangle.
    pub fn from_view_rect(rect: ViewRect, bounds: Size) -> Result<Self, RegionError> {
        if bounds.is_empty() {
            return Err(RegionError::EmptyBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        let width = rect.width / bounds.width;
        let height = rect.height / bounds.height;
        let max_y = 1.0 - rect.y / bounds.height;
        Self::new(rect.x / bounds.width, max_y - height, width, height)
    }
}

/// Axis-aligned rectangle in view space (top-left origin).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewRect {
    /// Top-left x coordinate
    pub x: f64,
    /// Top-left y coordinate
    pub y: f64,
    /// Width of the rectangle
    pub width: f64,
    /// Height of the rectangle
    pub height: f64,
}

impl ViewRect {
    /// Create a new ViewRect from top-left coordinates and dimensions.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a ViewRect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }
}
