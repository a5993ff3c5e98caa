//! Drone motion model: points, motion laws, and straight-line trajectories.
//!
//! The individual crates are re-exported here so front-ends (CLI, plots,
//! notebooks) only need a single dependency.

pub use drone_config as config;
pub use drone_core as primitives;
pub use drone_export as export;
pub use drone_motion as motion;
pub use drone_trajectory as trajectory;
pub use drone_vehicle as vehicle;

pub use drone_core::{PhysicalConstants, Point};
pub use drone_motion::{FrameMotion, MotionError, MotionModel, RandomWalk};
pub use drone_trajectory::{
    TrajectoryError, TrajectoryGenerator, compute_direction, compute_trajectory_points,
};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
