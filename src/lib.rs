//! Screen-space rendering core for detected object trajectories.
//!
//! A detector reports each trajectory as normalized points with a
//! bottom-left origin. This crate gates those observations by confidence,
//! projects them into a view through a region of interest and keeps the
//! resulting polyline ready for an overlay to stroke.
//!
//! ```
//! use trajectory_overlay::{RegionOfInterest, Size, TrajectorySample, TrajectoryState};
//!
//! let roi = RegionOfInterest::new(0.3, 0.25, 0.5, 0.5).unwrap();
//! let mut state = TrajectoryState::with_default_config(roi, Size::new(400.0, 800.0));
//!
//! let sample = TrajectorySample::builder()
//!     .point(0.1, 0.1)
//!     .point(0.5, 0.5)
//!     .duration(0.4)
//!     .confidence(1.0)
//!     .build();
//! assert!(state.update(sample).is_accepted());
//! assert_eq!(state.current_path().len(), 2);
//! ```

pub mod integration;
pub mod trajectory;

pub use integration::{
    AnalysisSession, DetectionWorker, Frame, FrameSupplier, IntoSamples, Orientation,
    ReplaySource, SessionError, SharedRegion, TrajectoryMessage, TrajectoryPipeline,
    TrajectoryReceiver, TrajectorySender, TrajectorySource,
};
pub use trajectory::{
    AffineTransform, NormalizedPoint, Point, RegionError, RegionOfInterest, SampleBuilder,
    ScreenPath, Size, TrajectoryConfig, TrajectorySample, TrajectoryState, UpdateOutcome,
    ViewRect, angle_from_horizontal, distance, project,
};
