//! Integration module for connecting frame suppliers and trajectory detectors
//! with the overlay state.
//!
//! Detection and frame decoding are external capabilities; this module
//! provides the traits they plug into, the message channel that carries
//! their results to the state owner, and pipelines that drive both.

mod channel;
mod detector;
mod error;
mod frame;
mod pipeline;
mod session;

pub use channel::{TrajectoryMessage, TrajectoryReceiver, TrajectorySender, channel};
pub use detector::{FrameSupplier, IntoSamples, ReplaySource, TrajectorySource};
pub use error::SessionError;
pub use frame::{Frame, Orientation};
pub use pipeline::TrajectoryPipeline;
pub use session::{AnalysisSession, DetectionWorker, SharedRegion};
