//! Background detection with a single-owner overlay state.
//!
//! An `AnalysisSession` is built explicitly from the picked frame supplier
//! and handed to whoever presents the overlay. Detection runs on a worker
//! thread; the session drains the worker's messages on its own thread, so
//! the state has exactly one mutator.

use std::fmt::Display;
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};

use log::{info, warn};

use crate::integration::channel::{TrajectoryMessage, TrajectoryReceiver, TrajectorySender, channel};
use crate::integration::detector::{FrameSupplier, TrajectorySource};
use crate::integration::error::SessionError;
use crate::trajectory::{RegionOfInterest, ScreenPath, Size, TrajectoryState};

/// Region of interest readable by the worker and written by the session.
#[derive(Debug, Clone, Default)]
pub struct SharedRegion {
    inner: Arc<RwLock<RegionOfInterest>>,
}

impl SharedRegion {
    /// Share `roi` between the session and its worker.
    pub fn new(roi: RegionOfInterest) -> Self {
        Self {
            inner: Arc::new(RwLock::new(roi)),
        }
    }

    /// Current region.
    pub fn get(&self) -> RegionOfInterest {
        // RegionOfInterest is Copy and always valid, so a poisoned lock is still readable
        *self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the region for every holder.
    pub fn set(&self, roi: RegionOfInterest) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = roi;
    }
}

/// Handle to the thread producing trajectory observations.
#[derive(Debug)]
pub struct DetectionWorker {
    handle: JoinHandle<usize>,
}

impl DetectionWorker {
    /// Spawn a worker pulling frames from `supplier` and detecting with `source`.
    ///
    /// The worker first sends a reset, then publishes the observations of
    /// every frame that produced any, each replacing the previous batch if
    /// the owner has not taken it yet. It stops when the supplier runs dry or
    /// the receiving side is dropped.
    pub fn spawn<F, S>(
        mut supplier: F,
        mut source: S,
        region: SharedRegion,
        sender: TrajectorySender,
    ) -> Result<Self, SessionError>
    where
        F: FrameSupplier + Send + 'static,
        S: TrajectorySource + Send + 'static,
        S::Error: Display,
    {
        let handle = thread::Builder::new()
            .name("trajectory-detection".to_string())
            .spawn(move || {
                info!("trajectory detection started");
                let mut frames = 0usize;
                if sender.send(TrajectoryMessage::Reset).is_err() {
                    return frames;
                }
                while let Some(frame) = supplier.next_frame() {
                    frames += 1;
                    let roi = region.get();
                    let samples = match source.detect(&frame, &roi) {
                        Ok(samples) => samples,
                        Err(e) => {
                            warn!("trajectory detection failed at {:?}: {}", frame.timestamp, e);
                            continue;
                        }
                    };
                    if samples.is_empty() {
                        continue;
                    }
                    if sender.send(TrajectoryMessage::Observations(samples)).is_err() {
                        info!("trajectory receiver dropped, stopping detection");
                        break;
                    }
                }
                info!("trajectory detection finished after {} frames", frames);
                frames
            })?;
        Ok(Self { handle })
    }

    /// True once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker; returns the number of frames it pulled.
    pub fn join(self) -> Result<usize, SessionError> {
        self.handle.join().map_err(|_| SessionError::WorkerPanicked)
    }
}

/// Overlay state plus the detection worker feeding it.
#[derive(Debug)]
pub struct AnalysisSession {
    state: TrajectoryState,
    region: SharedRegion,
    receiver: TrajectoryReceiver,
    worker: DetectionWorker,
}

impl AnalysisSession {
    /// Start detecting on `supplier` for the region and bounds held by `state`.
    ///
    /// # Arguments
    /// * `supplier` - Frames of the picked video or camera feed
    /// * `source` - Trajectory detector run on every frame
    /// * `state` - Overlay state; its region is shared with the worker
    ///
    /// # Returns
    /// The running session, or an error if the worker thread could not be spawned.
    pub fn start<F, S>(supplier: F, source: S, state: TrajectoryState) -> Result<Self, SessionError>
    where
        F: FrameSupplier + Send + 'static,
        S: TrajectorySource + Send + 'static,
        S::Error: Display,
    {
        let region = SharedRegion::new(*state.region_of_interest());
        let (sender, receiver) = channel();
        let worker = DetectionWorker::spawn(supplier, source, region.clone(), sender)?;
        Ok(Self {
            state,
            region,
            receiver,
            worker,
        })
    }

    /// Apply the pending reset and latest batch; call once per display refresh
    /// before drawing. Returns the number of messages applied.
    pub fn pump(&mut self) -> usize {
        self.receiver.drain_into(&mut self.state)
    }

    /// Get a reference to the overlay state.
    pub fn state(&self) -> &TrajectoryState {
        &self.state
    }

    /// Path to draw on this refresh.
    pub fn current_path(&self) -> &ScreenPath {
        self.state.current_path()
    }

    /// Seconds covered by the visible trajectory.
    pub fn duration(&self) -> f64 {
        self.state.duration()
    }

    /// Change the region for both the overlay and subsequent detections.
    pub fn set_region_of_interest(&mut self, roi: RegionOfInterest) {
        self.region.set(roi);
        self.state.set_region_of_interest(roi);
    }

    /// Resize the overlay; the visible path is re-projected.
    pub fn set_view_bounds(&mut self, bounds: Size) {
        self.state.set_view_bounds(bounds);
    }

    /// Clear the visible trajectory.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// True once the worker has stopped producing.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker, apply everything it sent and return the final state.
    pub fn finish(mut self) -> Result<TrajectoryState, SessionError> {
        self.worker.join()?;
        self.receiver.wait_into(&mut self.state);
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::detector::ReplaySource;
    use crate::integration::frame::Frame;
    use crate::trajectory::TrajectorySample;

    fn sample(x: f64, confidence: f32) -> TrajectorySample {
        TrajectorySample::builder()
            .point(x, 0.5)
            .point(x + 0.25, 0.75)
            .duration(0.5)
            .confidence(confidence)
            .build()
    }

    #[test]
    fn test_shared_region() {
        let region = SharedRegion::default();
        assert_eq!(region.get(), RegionOfInterest::full());
        let roi = RegionOfInterest::new(0.1, 0.1, 0.5, 0.5).unwrap();
        region.clone().set(roi);
        assert_eq!(region.get(), roi);
    }

    #[test]
    fn test_session_keeps_last_accepted() {
        let source = ReplaySource::new(vec![vec![sample(0.0, 1.0)], vec![], vec![sample(0.5, 1.0)]]);
        let frames = (0..3).map(|_| Frame::default());
        let state = TrajectoryState::with_default_config(RegionOfInterest::full(), Size::new(100.0, 100.0));

        let session = AnalysisSession::start(frames, source, state).unwrap();
        let state = session.finish().unwrap();
        assert_eq!(state.current_path().len(), 2);
        assert_eq!(state.current_path().first().unwrap().x, 50.0);
        assert_eq!(state.duration(), 0.5);
    }

    #[test]
    fn test_session_clears_on_rejected_cycle() {
        let source = ReplaySource::new(vec![vec![sample(0.0, 1.0)], vec![sample(0.5, 0.5)]]);
        let frames = (0..2).map(|_| Frame::default());
        let state = TrajectoryState::with_default_config(RegionOfInterest::full(), Size::new(100.0, 100.0));

        let state = AnalysisSession::start(frames, source, state)
            .unwrap()
            .finish()
            .unwrap();
        assert!(state.current_path().is_empty());
        assert_eq!(state.duration(), 0.0);
    }
}
