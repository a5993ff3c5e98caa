//! Trajectories driven by a motion model.

use drone_core::{Point, vector};
use drone_motion::MotionModel;

use crate::{MIN_POINTS, TrajectoryError, compute_direction, compute_trajectory_points};

/// A point on a trajectory tagged with the time it is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPoint {
    pub time: f64,
    pub point: Point,
}

/// Couples a scalar [`MotionModel`] with straight segments.
///
/// The model's position is read as the distance travelled along the segment,
/// measured from the model's own initial position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryGenerator {
    pub model: MotionModel,
}

impl TrajectoryGenerator {
    pub fn new(model: MotionModel) -> Self {
        Self { model }
    }

    pub fn compute_direction(&self, a: &Point, b: &Point) -> Point {
        compute_direction(a, b)
    }

    pub fn compute_trajectory_points(
        &self,
        a: &Point,
        b: &Point,
        num_points: usize,
    ) -> Result<Vec<Point>, TrajectoryError> {
        compute_trajectory_points(a, b, num_points)
    }

    /// Where the body is on `a -> b` at each of `times`.
    ///
    /// Travel is clamped to the segment: the body waits at `a` before it starts
    /// moving forward and stops at `b` once the distance is covered.
    pub fn follow(
        &self,
        a: &Point,
        b: &Point,
        times: &[f64],
    ) -> Result<Vec<TimedPoint>, TrajectoryError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(TrajectoryError::InvalidInput { which: "segment" });
        }
        let length = vector::norm(&compute_direction(a, b));
        let (_, start) = self.model.origin();

        times
            .iter()
            .map(|&time| {
                let travelled = self.model.position_at(time)? - start;
                let fraction = if length > 0.0 {
                    (travelled / length).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let point = if fraction >= 1.0 {
                    *b
                } else {
                    vector::lerp(a, b, fraction)
                };
                Ok(TimedPoint { time, point })
            })
            .collect()
    }

    /// [`follow`](Self::follow) sampled at `num_points` evenly spaced times in `[t_start, t_end]`.
    pub fn follow_evenly(
        &self,
        a: &Point,
        b: &Point,
        t_start: f64,
        t_end: f64,
        num_points: usize,
    ) -> Result<Vec<TimedPoint>, TrajectoryError> {
        let times = evenly_spaced_times(t_start, t_end, num_points)?;
        self.follow(a, b, &times)
    }
}

/// `num_points` times from `t_start` to `t_end` inclusive.
pub fn evenly_spaced_times(
    t_start: f64,
    t_end: f64,
    num_points: usize,
) -> Result<Vec<f64>, TrajectoryError> {
    if num_points < MIN_POINTS {
        return Err(TrajectoryError::InvalidParameter(num_points));
    }
    if !t_start.is_finite() || !t_end.is_finite() {
        return Err(TrajectoryError::InvalidInput { which: "time window" });
    }
    let last = (num_points - 1) as f64;
    let mut times: Vec<f64> = (0..num_points)
        .map(|i| t_start + (t_end - t_start) * (i as f64 / last))
        .collect();
    if let Some(end) = times.last_mut() {
        *end = t_end;
    }
    Ok(times)
}
