//! Point-mass motion models: how a scalar position evolves with time.
//!
//! A [`MotionModel`] is an immutable origin plus the parameters of one motion
//! kind. Positions are always computed from that origin, never accumulated, so
//! evaluating the same model at the same time gives the same answer. Step-wise
//! simulation replaces the whole value through [`MotionModel::advance`].

mod frame;
mod random;

pub use frame::FrameMotion;
pub use random::{MAX_WALK_STEPS, RandomWalk};

use thiserror::Error;

/// Errors raised while building or evaluating motion models.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("{field} must be a finite number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
    #[error("random walk parameter {field} is out of range (got {value})")]
    InvalidWalk { field: &'static str, value: f64 },
    #[error("random walk would need {steps} steps, more than the limit of {limit}", limit = MAX_WALK_STEPS)]
    WalkTooLong { steps: f64 },
}

/// The supported motion kinds, each carrying only its own parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionModel {
    /// The position never changes.
    Constant { time_i: f64, pos_i: f64 },
    /// Constant acceleration from an initial speed.
    UniformlyAccelerated {
        time_i: f64,
        pos_i: f64,
        speed_i: f64,
        acc: f64,
    },
    /// Seeded random walk kept within `bound` of `center`.
    ///
    /// `time_i` is when the walk started. `pos_i` is the position after the
    /// first `steps_taken` steps, and `last_step` the displacement of the last
    /// of them.
    Random {
        time_i: f64,
        pos_i: f64,
        center: f64,
        walk: RandomWalk,
        steps_taken: u64,
        last_step: f64,
    },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, MotionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MotionError::InvalidInput { field, value })
    }
}

impl MotionModel {
    /// A body that stays at `pos_i`.
    pub fn constant(time_i: f64, pos_i: f64) -> Result<Self, MotionError> {
        Ok(MotionModel::Constant {
            time_i: ensure_finite("time_i", time_i)?,
            pos_i: ensure_finite("pos_i", pos_i)?,
        })
    }

    /// Uniformly accelerated motion. Any finite speed or acceleration is accepted, zero included.
    pub fn uniformly_accelerated(
        time_i: f64,
        pos_i: f64,
        speed_i: f64,
        acc: f64,
    ) -> Result<Self, MotionError> {
        Ok(MotionModel::UniformlyAccelerated {
            time_i: ensure_finite("time_i", time_i)?,
            pos_i: ensure_finite("pos_i", pos_i)?,
            speed_i: ensure_finite("speed_i", speed_i)?,
            acc: ensure_finite("acc", acc)?,
        })
    }

    /// Random walk starting (and centred) at `pos_i`.
    pub fn random(time_i: f64, pos_i: f64, walk: RandomWalk) -> Result<Self, MotionError> {
        walk.validate()?;
        let pos_i = ensure_finite("pos_i", pos_i)?;
        Ok(MotionModel::Random {
            time_i: ensure_finite("time_i", time_i)?,
            pos_i,
            center: pos_i,
            walk,
            steps_taken: 0,
            last_step: 0.0,
        })
    }

    /// Short lowercase name of the motion kind, used in reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            MotionModel::Constant { .. } => "constant",
            MotionModel::UniformlyAccelerated { .. } => "accelerated",
            MotionModel::Random { .. } => "random",
        }
    }

    /// The `(time, position)` origin the model evaluates from.
    ///
    /// For random motion the time is the boundary of the last step taken.
    pub fn origin(&self) -> (f64, f64) {
        match *self {
            MotionModel::Constant { time_i, pos_i }
            | MotionModel::UniformlyAccelerated { time_i, pos_i, .. } => (time_i, pos_i),
            MotionModel::Random {
                time_i,
                pos_i,
                walk,
                steps_taken,
                ..
            } => (time_i + steps_taken as f64 * walk.interval, pos_i),
        }
    }

    /// Absolute position at time `t`, computed from the model origin.
    pub fn position_at(&self, t: f64) -> Result<f64, MotionError> {
        let t = ensure_finite("t", t)?;
        match *self {
            MotionModel::Constant { pos_i, .. } => Ok(pos_i),
            MotionModel::UniformlyAccelerated {
                time_i,
                pos_i,
                speed_i,
                acc,
            } => {
                let dt = t - time_i;
                Ok(pos_i + speed_i * dt + 0.5 * acc * dt * dt)
            }
            MotionModel::Random {
                time_i,
                pos_i,
                center,
                walk,
                steps_taken,
                ..
            } => {
                let steps = walk.pending_steps(t - time_i, steps_taken)?;
                Ok(walk.replay(pos_i, center, steps_taken, steps).position)
            }
        }
    }

    /// Instantaneous velocity at time `t`.
    ///
    /// For random motion this is the displacement of the last completed step
    /// divided by the step interval (zero before the first step).
    pub fn velocity_at(&self, t: f64) -> Result<f64, MotionError> {
        let t = ensure_finite("t", t)?;
        match *self {
            MotionModel::Constant { .. } => Ok(0.0),
            MotionModel::UniformlyAccelerated {
                time_i,
                speed_i,
                acc,
                ..
            } => Ok(speed_i + acc * (t - time_i)),
            MotionModel::Random {
                time_i,
                pos_i,
                center,
                walk,
                steps_taken,
                last_step,
            } => {
                let steps = walk.pending_steps(t - time_i, steps_taken)?;
                if steps == 0 {
                    return Ok(last_step / walk.interval);
                }
                Ok(walk.replay(pos_i, center, steps_taken, steps).last_step / walk.interval)
            }
        }
    }

    /// A new model whose origin is the state reached at time `t`.
    ///
    /// Random motion moves its origin to the last step boundary at or before
    /// `t`, so a partly elapsed interval is kept for the next call.
    pub fn advance(&self, t: f64) -> Result<Self, MotionError> {
        let t = ensure_finite("t", t)?;
        Ok(match *self {
            MotionModel::Constant { pos_i, .. } => MotionModel::Constant { time_i: t, pos_i },
            MotionModel::UniformlyAccelerated {
                time_i,
                speed_i,
                acc,
                ..
            } => MotionModel::UniformlyAccelerated {
                time_i: t,
                pos_i: self.position_at(t)?,
                speed_i: speed_i + acc * (t - time_i),
                acc,
            },
            MotionModel::Random {
                time_i,
                pos_i,
                center,
                walk,
                steps_taken,
                ..
            } => {
                let steps = walk.pending_steps(t - time_i, steps_taken)?;
                if steps == 0 {
                    return Ok(*self);
                }
                let outcome = walk.replay(pos_i, center, steps_taken, steps);
                MotionModel::Random {
                    time_i,
                    pos_i: outcome.position,
                    center,
                    walk,
                    steps_taken: steps_taken + steps,
                    last_step: outcome.last_step,
                }
            }
        })
    }

    /// Move the model to time `t` and return the new position.
    ///
    /// The whole state is replaced, so successive calls agree with
    /// `position_at` on the starting model.
    pub fn update_position(&mut self, t: f64) -> Result<f64, MotionError> {
        *self = self.advance(t)?;
        Ok(self.origin().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerated_from_rest() {
        let model = MotionModel::uniformly_accelerated(0.0, 0.0, 0.0, 2.0).unwrap();
        assert_eq!(model.position_at(2.0).unwrap(), 4.0);
        assert_eq!(model.velocity_at(2.0).unwrap(), 4.0);
    }

    #[test]
    fn accelerated_with_initial_speed_and_offset_origin() {
        let model = MotionModel::uniformly_accelerated(1.0, 10.0, 3.0, -1.0).unwrap();
        // dt = 2: 10 + 3*2 - 0.5*4
        assert!((model.position_at(3.0).unwrap() - 14.0).abs() < 1e-12);
        assert_eq!(model.position_at(1.0).unwrap(), 10.0);
    }

    #[test]
    fn constant_never_moves() {
        let model = MotionModel::constant(0.0, 7.5).unwrap();
        for t in [-10.0, 0.0, 0.1, 1.0e6] {
            assert_eq!(model.position_at(t).unwrap(), 7.5);
            assert_eq!(model.velocity_at(t).unwrap(), 0.0);
        }
    }

    #[test]
    fn update_position_does_not_compound() {
        let reference = MotionModel::uniformly_accelerated(0.0, 0.0, 1.0, 2.0).unwrap();
        let mut stepped = reference;
        for t in [1.0, 2.0, 3.5, 5.0] {
            let pos = stepped.update_position(t).unwrap();
            let expected = reference.position_at(t).unwrap();
            assert!((pos - expected).abs() < 1e-9, "t={t}: {pos} vs {expected}");
        }
        assert_eq!(stepped.origin().0, 5.0);
    }

    #[test]
    fn advance_carries_speed_forward() {
        let model = MotionModel::uniformly_accelerated(0.0, 0.0, 0.0, 2.0).unwrap();
        match model.advance(2.0).unwrap() {
            MotionModel::UniformlyAccelerated {
                time_i,
                pos_i,
                speed_i,
                acc,
            } => {
                assert_eq!((time_i, pos_i, speed_i, acc), (2.0, 4.0, 4.0, 2.0));
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(matches!(
            MotionModel::constant(f64::NAN, 0.0),
            Err(MotionError::InvalidInput { field: "time_i", .. })
        ));
        assert!(matches!(
            MotionModel::uniformly_accelerated(0.0, 0.0, 0.0, f64::INFINITY),
            Err(MotionError::InvalidInput { field: "acc", .. })
        ));
        let model = MotionModel::constant(0.0, 0.0).unwrap();
        assert!(matches!(
            model.position_at(f64::NEG_INFINITY),
            Err(MotionError::InvalidInput { field: "t", .. })
        ));
    }

    #[test]
    fn names_and_origins() {
        let walk = RandomWalk::new(0.5, 1.0, 2.0, 7).unwrap();
        let model = MotionModel::random(3.0, -1.0, walk).unwrap();
        assert_eq!(model.name(), "random");
        assert_eq!(model.origin(), (3.0, -1.0));
    }
}
