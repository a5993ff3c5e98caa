//! Three-dimensional motion built from one scalar model per axis.

use drone_core::Point;

use crate::{MotionError, MotionModel};

/// Independent motion along each axis of a reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMotion {
    pub x: MotionModel,
    pub y: MotionModel,
    pub z: MotionModel,
}

impl FrameMotion {
    pub fn new(x: MotionModel, y: MotionModel, z: MotionModel) -> Self {
        Self { x, y, z }
    }

    /// A body resting at `at` from `time_i` onwards.
    pub fn stationary(time_i: f64, at: Point) -> Result<Self, MotionError> {
        Ok(Self {
            x: MotionModel::constant(time_i, at.x)?,
            y: MotionModel::constant(time_i, at.y)?,
            z: MotionModel::constant(time_i, at.z)?,
        })
    }

    /// Uniformly accelerated motion with vector initial speed and acceleration.
    pub fn uniformly_accelerated(
        time_i: f64,
        origin: Point,
        speed_i: Point,
        acc: Point,
    ) -> Result<Self, MotionError> {
        Ok(Self {
            x: MotionModel::uniformly_accelerated(time_i, origin.x, speed_i.x, acc.x)?,
            y: MotionModel::uniformly_accelerated(time_i, origin.y, speed_i.y, acc.y)?,
            z: MotionModel::uniformly_accelerated(time_i, origin.z, speed_i.z, acc.z)?,
        })
    }

    pub fn position_at(&self, t: f64) -> Result<Point, MotionError> {
        Ok(Point::new(
            self.x.position_at(t)?,
            self.y.position_at(t)?,
            self.z.position_at(t)?,
        ))
    }

    pub fn velocity_at(&self, t: f64) -> Result<Point, MotionError> {
        Ok(Point::new(
            self.x.velocity_at(t)?,
            self.y.velocity_at(t)?,
            self.z.velocity_at(t)?,
        ))
    }

    pub fn advance(&self, t: f64) -> Result<Self, MotionError> {
        Ok(Self {
            x: self.x.advance(t)?,
            y: self.y.advance(t)?,
            z: self.z.advance(t)?,
        })
    }
}
