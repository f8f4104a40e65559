//! TrajectoryPipeline for combining detection with the overlay state.

use std::fmt::Display;

use log::warn;

use crate::integration::detector::{FrameSupplier, TrajectorySource};
use crate::integration::frame::Frame;
use crate::trajectory::{RegionOfInterest, Size, TrajectoryConfig, TrajectoryState, UpdateOutcome};

/// Runs a `TrajectorySource` and feeds its observations into a `TrajectoryState`
/// on the calling thread.
pub struct TrajectoryPipeline<S: TrajectorySource> {
    source: S,
    state: TrajectoryState,
}

impl<S: TrajectorySource> TrajectoryPipeline<S> {
    /// Create a new pipeline from a detector and an overlay state.
    pub fn new(source: S, state: TrajectoryState) -> Self {
        Self { source, state }
    }

    /// Create a pipeline with default state configuration.
    pub fn with_default_config(source: S, roi: RegionOfInterest, view_bounds: Size) -> Self {
        Self::new(source, TrajectoryState::new(TrajectoryConfig::default(), roi, view_bounds))
    }

    /// Detect trajectories in one frame and apply them.
    ///
    /// The detector only sees the current region of interest.
    ///
    /// # Arguments
    /// * `frame` - The frame to analyse
    ///
    /// # Returns
    /// Whether the frame's observations replaced the path, or the detection error.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<UpdateOutcome, S::Error> {
        let samples = self.source.detect(frame, self.state.region_of_interest())?;
        Ok(self.state.apply_observations(samples))
    }

    /// Process every frame from `supplier`; returns the number of frames
    /// that produced an accepted trajectory.
    ///
    /// Detection failures are logged and the frame is skipped.
    pub fn run<F: FrameSupplier>(&mut self, supplier: &mut F) -> usize
    where
        S::Error: Display,
    {
        self.state.reset();
        let mut accepted = 0;
        while let Some(frame) = supplier.next_frame() {
            match self.process_frame(&frame) {
                Ok(outcome) if outcome.is_accepted() => accepted += 1,
                Ok(_) => {}
                Err(e) => warn!("trajectory detection failed at {:?}: {}", frame.timestamp, e),
            }
        }
        accepted
    }

    /// Get a reference to the underlying detector.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying detector.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the overlay state.
    pub fn state(&self) -> &TrajectoryState {
        &self.state
    }

    /// Get a mutable reference to the overlay state.
    pub fn state_mut(&mut self) -> &mut TrajectoryState {
        &mut self.state
    }

    /// Consume the pipeline, keeping only the overlay state.
    pub fn into_state(self) -> TrajectoryState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::TrajectorySample;

    struct MockSource {
        samples: Vec<TrajectorySample>,
        seen_roi: Option<RegionOfInterest>,
        fail_every: Option<usize>,
        calls: usize,
    }

    impl MockSource {
        fn new(samples: Vec<TrajectorySample>) -> Self {
            Self {
                samples,
                seen_roi: None,
                fail_every: None,
                calls: 0,
            }
        }
    }

    impl TrajectorySource for MockSource {
        type Error = String;

        fn detect(
            &mut self,
            _frame: &Frame,
            roi: &RegionOfInterest,
        ) -> Result<Vec<TrajectorySample>, Self::Error> {
            self.calls += 1;
            self.seen_roi = Some(*roi);
            if self.fail_every.is_some_and(|n| self.calls % n == 0) {
                return Err("request failed".to_string());
            }
            Ok(self.samples.clone())
        }
    }

    fn confident() -> TrajectorySample {
        TrajectorySample::builder()
            .point(0.1, 0.1)
            .point(0.5, 0.5)
            .duration(0.3)
            .confidence(1.0)
            .build()
    }

    #[test]
    fn test_process_frame_passes_region() {
        let roi = RegionOfInterest::new(0.3, 0.25, 0.5, 0.5).unwrap();
        let mut pipeline =
            TrajectoryPipeline::with_default_config(MockSource::new(vec![confident()]), roi, Size::new(400.0, 800.0));

        let outcome = pipeline.process_frame(&Frame::default()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Accepted);
        assert_eq!(pipeline.source().seen_roi, Some(roi));
        assert_eq!(pipeline.state().current_path().len(), 2);
    }

    #[test]
    fn test_process_frame_propagates_error() {
        let mut source = MockSource::new(vec![confident()]);
        source.fail_every = Some(1);
        let mut pipeline =
            TrajectoryPipeline::with_default_config(source, RegionOfInterest::full(), Size::new(10.0, 10.0));
        assert_eq!(pipeline.process_frame(&Frame::default()), Err("request failed".to_string()));
        assert!(pipeline.state().current_path().is_empty());
    }

    #[test]
    fn test_run_skips_failed_frames() {
        let mut source = MockSource::new(vec![confident()]);
        source.fail_every = Some(2);
        let mut pipeline =
            TrajectoryPipeline::with_default_config(source, RegionOfInterest::full(), Size::new(10.0, 10.0));

        let mut frames = (0..4).map(|_| Frame::default());
        assert_eq!(pipeline.run(&mut frames), 2);
        assert_eq!(pipeline.source().calls, 4);
        assert_eq!(pipeline.into_state().duration(), 0.3);
    }

    #[test]
    fn test_run_clears_on_rejected_frame() {
        let rejected = TrajectorySample {
            confidence: 0.5,
            ..confident()
        };
        let source = crate::integration::detector::ReplaySource::new(vec![
            vec![confident()],
            vec![],
            vec![rejected],
        ]);
        let mut pipeline =
            TrajectoryPipeline::with_default_config(source, RegionOfInterest::full(), Size::new(10.0, 10.0));

        let mut frames = (0..2).map(|_| Frame::default());
        assert_eq!(pipeline.run(&mut frames), 1);
        // the empty second frame left the path alone
        assert_eq!(pipeline.state().current_path().len(), 2);

        let outcome = pipeline.process_frame(&Frame::default()).unwrap();
        assert_eq!(outcome, UpdateOutcome::Rejected);
        assert!(pipeline.state().current_path().is_empty());
    }
}
