//! Trajectory state container driven by incoming detector observations.

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::trajectory::geometry::{NormalizedPoint, Size};
use crate::trajectory::path::{ScreenPath, project};
use crate::trajectory::region::{RegionOfInterest, ViewRect};
use crate::trajectory::sample::{TrajectorySample, extent};

/// Configuration for the TrajectoryState.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrajectoryConfig {
    /// Samples are accepted only when their confidence is strictly above this
    pub confidence_threshold: f32,
    /// Reset the state when every sample of a non-empty batch is rejected
    pub clear_on_rejected_batch: bool,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.99,
            clear_on_rejected_batch: true,
        }
    }
}

/// Result of offering observations to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The path was replaced
    Accepted,
    /// Nothing was accepted
    Rejected,
}

impl UpdateOutcome {
    /// True for `Accepted`.
    pub fn is_accepted(self) -> bool {
        self == UpdateOutcome::Accepted
    }
}

/// Renderable trajectory state for one overlay.
///
/// Single writer: mutate it only from the thread that draws it. Each
/// accepted sample replaces the path; nothing is appended across samples.
#[derive(Debug, Clone)]
pub struct TrajectoryState {
    config: TrajectoryConfig,
    region_of_interest: RegionOfInterest,
    view_bounds: Size,
    current_path: ScreenPath,
    duration: f64,
    distance: f64,
    // kept so a region/bounds change can re-project the visible path
    last_points: Vec<NormalizedPoint>,
}

impl TrajectoryState {
    /// Create an empty state for the given region and view size.
    pub fn new(config: TrajectoryConfig, region_of_interest: RegionOfInterest, view_bounds: Size) -> Self {
        Self {
            config,
            region_of_interest,
            view_bounds,
            current_path: ScreenPath::new(),
            duration: 0.0,
            distance: 0.0,
            last_points: Vec::new(),
        }
    }

    /// Create an empty state with default configuration.
    pub fn with_default_config(region_of_interest: RegionOfInterest, view_bounds: Size) -> Self {
        Self::new(TrajectoryConfig::default(), region_of_interest, view_bounds)
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// Path to draw on the next refresh.
    pub fn current_path(&self) -> &ScreenPath {
        &self.current_path
    }

    /// Seconds covered by the last accepted sample.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Cumulative view-space length of the current path.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Get a reference to the current region of interest.
    pub fn region_of_interest(&self) -> &RegionOfInterest {
        &self.region_of_interest
    }

    /// Size of the overlay view the path is projected into.
    pub fn view_bounds(&self) -> Size {
        self.view_bounds
    }

    /// Region of interest in view space for the current bounds.
    pub fn region_view_rect(&self) -> ViewRect {
        self.region_of_interest.to_view_rect(self.view_bounds)
    }

    /// Normalized bounding size of the last accepted points.
    pub fn sample_extent(&self) -> Size {
        extent(&self.last_points)
    }

    /// Clear the path, duration and distance.
    pub fn reset(&mut self) {
        debug!("trajectory reset");
        self.current_path = ScreenPath::new();
        self.duration = 0.0;
        self.distance = 0.0;
        self.last_points.clear();
    }

    /// Offer one sample; low-confidence samples are dropped silently.
    ///
    /// # Arguments
    /// * `sample` - One detector observation
    ///
    /// # Returns
    /// `Accepted` when the path was replaced by the projection of the
    /// sample's detected points, `Rejected` when the state is unchanged.
    /// A confidence that is not a number never passes the gate.
    pub fn update(&mut self, sample: TrajectorySample) -> UpdateOutcome {
        let confident = sample.confidence > self.config.confidence_threshold;
        if !confident {
            trace!(
                "dropping trajectory sample: confidence {} <= {}",
                sample.confidence, self.config.confidence_threshold
            );
            return UpdateOutcome::Rejected;
        }

        self.duration = sample.duration;
        self.last_points = sample.detected_points;
        self.rebuild_path();
        debug!(
            "trajectory accepted: {} points over {:.3}s, length {:.1}",
            self.current_path.len(),
            self.duration,
            self.distance
        );
        UpdateOutcome::Accepted
    }

    /// Apply one detector completion batch in order; the last accepted sample wins.
    ///
    /// With `clear_on_rejected_batch` set (the default), a non-empty batch in
    /// which nothing passes the gate resets the state. An empty batch leaves
    /// it untouched.
    pub fn apply_observations<I>(&mut self, samples: I) -> UpdateOutcome
    where
        I: IntoIterator<Item = TrajectorySample>,
    {
        let mut seen = 0usize;
        let mut outcome = UpdateOutcome::Rejected;
        for sample in samples {
            seen += 1;
            if self.update(sample).is_accepted() {
                outcome = UpdateOutcome::Accepted;
            }
        }
        if outcome == UpdateOutcome::Rejected && seen > 0 && self.config.clear_on_rejected_batch {
            self.reset();
        }
        outcome
    }

    /// Change the region and re-project the current path.
    pub fn set_region_of_interest(&mut self, region_of_interest: RegionOfInterest) {
        self.region_of_interest = region_of_interest;
        self.rebuild_path();
    }

    /// Change the view size and re-project the current path.
    pub fn set_view_bounds(&mut self, view_bounds: Size) {
        self.view_bounds = view_bounds;
        self.rebuild_path();
    }

    fn rebuild_path(&mut self) {
        self.current_path = project(&self.last_points, &self.region_of_interest, self.view_bounds);
        self.distance = self.current_path.length();
    }
}
