//! Traits for the external collaborators: frame supply and trajectory detection.

use crate::integration::frame::Frame;
use crate::trajectory::{RegionOfInterest, TrajectorySample};

/// Trait for trajectory detection backends.
///
/// Implement this trait to connect a platform vision capability (or a
/// replay of recorded observations) to the overlay.
///
/// # Example
///
/// ```ignore
/// use trajectory_overlay::{Frame, RegionOfInterest, TrajectorySample, TrajectorySource};
///
/// struct MyDetector {
///     // Your backend here
/// }
///
/// impl TrajectorySource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &Frame, roi: &RegionOfInterest) -> Result<Vec<TrajectorySample>, Self::Error> {
///         // Run detection and return observations
///         Ok(vec![])
///     }
/// }
/// ```
pub trait TrajectorySource {
    /// Error type for detection failures.
    type Error;

    /// Run detection on one frame, restricted to `roi`.
    ///
    /// Returns zero or more observations, each carrying its own confidence;
    /// filtering is left to the caller.
    fn detect(
        &mut self,
        frame: &Frame,
        roi: &RegionOfInterest,
    ) -> Result<Vec<TrajectorySample>, Self::Error>;
}

/// Supplier of frames in presentation order (decoded video or live camera).
pub trait FrameSupplier {
    /// Next frame, or `None` once the supply is exhausted.
    fn next_frame(&mut self) -> Option<Frame>;
}

impl<I> FrameSupplier for I
where
    I: Iterator<Item = Frame>,
{
    fn next_frame(&mut self) -> Option<Frame> {
        self.next()
    }
}

/// Helper trait for converting backend-specific observations to `TrajectorySample`.
pub trait IntoSamples {
    /// Convert the output into trajectory samples.
    fn into_samples(self) -> Vec<TrajectorySample>;
}

impl IntoSamples for Vec<TrajectorySample> {
    fn into_samples(self) -> Vec<TrajectorySample> {
        self
    }
}

impl IntoSamples for Option<TrajectorySample> {
    fn into_samples(self) -> Vec<TrajectorySample> {
        self.into_iter().collect()
    }
}

/// Source that replays recorded observation batches, one batch per frame.
///
/// Once the recording runs out every further frame yields no observations.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    batches: std::collections::VecDeque<Vec<TrajectorySample>>,
}

impl ReplaySource {
    /// Record the batches to replay, in frame order.
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoSamples,
    {
        Self {
            batches: batches.into_iter().map(IntoSamples::into_samples).collect(),
        }
    }

    /// Batches not yet replayed.
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl TrajectorySource for ReplaySource {
    type Error = std::convert::Infallible;

    fn detect(
        &mut self,
        _frame: &Frame,
        _roi: &RegionOfInterest,
    ) -> Result<Vec<TrajectorySample>, Self::Error> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}
