//! Discretized straight-line trajectories between two points in a frame.
//!
//! The segment `a -> b` is sampled by spacing a driver coordinate evenly between
//! the endpoints and placing the other two coordinates by linear interpolation
//! with the same parameter. The driver is `x` unless the segment has no `x`
//! extent, in which case `y` (then `z`) takes over. Segments lying in a
//! coordinate plane therefore need no special casing: the flat coordinate is
//! simply held constant.

mod generator;

pub use generator::{TimedPoint, TrajectoryGenerator, evenly_spaced_times};

use drone_core::{Point, vector};
use drone_motion::MotionError;
use thiserror::Error;
use tracing::debug;

/// Fewest points that describe a segment (its two endpoints).
pub const MIN_POINTS: usize = 2;

/// Errors raised while discretizing a trajectory.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("a trajectory needs at least two points (got {0})")]
    InvalidParameter(usize),
    #[error("{which} has a non-finite coordinate")]
    InvalidInput { which: &'static str },
    #[error("motion model evaluation failed: {0}")]
    Motion(#[from] MotionError),
}

/// Coordinate used to parameterize a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverAxis {
    X,
    Y,
    Z,
}

impl DriverAxis {
    /// First axis along which `direction` has a non-zero extent.
    pub fn for_direction(direction: &Point) -> Option<Self> {
        if direction.x != 0.0 {
            Some(DriverAxis::X)
        } else if direction.y != 0.0 {
            Some(DriverAxis::Y)
        } else if direction.z != 0.0 {
            Some(DriverAxis::Z)
        } else {
            None
        }
    }

    #[inline]
    pub fn component(self, p: &Point) -> f64 {
        match self {
            DriverAxis::X => p.x,
            DriverAxis::Y => p.y,
            DriverAxis::Z => p.z,
        }
    }

    #[inline]
    fn set(self, p: &mut Point, value: f64) {
        match self {
            DriverAxis::X => p.x = value,
            DriverAxis::Y => p.y = value,
            DriverAxis::Z => p.z = value,
        }
    }
}

/// Component-wise difference `b - a`.
pub fn compute_direction(a: &Point, b: &Point) -> Point {
    vector::sub(b, a)
}

/// Sample `num_points` evenly spaced points from `a` to `b`, both included.
///
/// Coincident endpoints yield `num_points` copies of `a`.
pub fn compute_trajectory_points(
    a: &Point,
    b: &Point,
    num_points: usize,
) -> Result<Vec<Point>, TrajectoryError> {
    if num_points < MIN_POINTS {
        return Err(TrajectoryError::InvalidParameter(num_points));
    }
    if !a.is_finite() {
        return Err(TrajectoryError::InvalidInput { which: "start point" });
    }
    if !b.is_finite() {
        return Err(TrajectoryError::InvalidInput { which: "end point" });
    }
    let direction = compute_direction(a, b);
    if !direction.is_finite() {
        return Err(TrajectoryError::InvalidInput { which: "direction" });
    }

    let Some(axis) = DriverAxis::for_direction(&direction) else {
        debug!(num_points, "coincident endpoints, repeating start point");
        return Ok(vec![*a; num_points]);
    };
    if axis != DriverAxis::X {
        debug!(?axis, ?direction, "segment has no x extent, switching driver axis");
    }

    let start = axis.component(a);
    let span = axis.component(&direction);
    let last = (num_points - 1) as f64;

    let mut points = Vec::with_capacity(num_points);
    for i in 0..num_points {
        let coordinate = start + span * (i as f64 / last);
        let t = (coordinate - start) / span;
        let mut point = vector::lerp(a, b, t);
        axis.set(&mut point, coordinate);
        points.push(point);
    }
    // pin the far endpoint against rounding in `start + span`
    if let Some(end) = points.last_mut() {
        *end = *b;
    }
    Ok(points)
}
