mod geometry;
mod path;
mod region;
mod sample;
mod state;
mod transform;

pub use geometry::{NormalizedPoint, Point, Size, angle_from_horizontal, distance};
pub use path::{ScreenPath, project, projection_transform};
pub use region::{RegionError, RegionOfInterest, ViewRect};
pub use sample::{SampleBuilder, TrajectorySample, extent};
pub use state::{TrajectoryConfig, TrajectoryState, UpdateOutcome};
pub use transform::AffineTransform;
