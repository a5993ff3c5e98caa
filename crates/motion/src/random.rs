//! Seeded, bounded random walk used by [`MotionModel::Random`](crate::MotionModel::Random).

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::{MotionError, ensure_finite};

/// Upper limit on the number of steps replayed for a single evaluation.
pub const MAX_WALK_STEPS: u64 = 10_000_000;

/// Parameters of a random walk.
///
/// Every `interval` time units the position moves by a uniform draw in
/// `[-max_step, max_step]`, then is clamped to `bound` around the walk centre.
/// The draw for step `k` comes from a `Xoshiro256StarStar` seeded with `seed`
/// mixed with `k`, so any stretch of the walk can be replayed on its own and
/// the walk is reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWalk {
    pub max_step: f64,
    pub interval: f64,
    pub bound: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkOutcome {
    pub position: f64,
    pub last_step: f64,
}

impl RandomWalk {
    pub fn new(max_step: f64, interval: f64, bound: f64, seed: u64) -> Result<Self, MotionError> {
        let walk = Self {
            max_step,
            interval,
            bound,
            seed,
        };
        walk.validate()?;
        Ok(walk)
    }

    pub(crate) fn validate(&self) -> Result<(), MotionError> {
        ensure_finite("max_step", self.max_step)?;
        ensure_finite("interval", self.interval)?;
        ensure_finite("bound", self.bound)?;
        if self.max_step < 0.0 {
            return Err(MotionError::InvalidWalk {
                field: "max_step",
                value: self.max_step,
            });
        }
        if self.interval <= 0.0 {
            return Err(MotionError::InvalidWalk {
                field: "interval",
                value: self.interval,
            });
        }
        if self.bound < 0.0 {
            return Err(MotionError::InvalidWalk {
                field: "bound",
                value: self.bound,
            });
        }
        Ok(())
    }

    /// Steps completed after `elapsed` time units that lie beyond the first `done`.
    pub(crate) fn pending_steps(&self, elapsed: f64, done: u64) -> Result<u64, MotionError> {
        if elapsed <= 0.0 {
            return Ok(0);
        }
        let pending = (elapsed / self.interval).floor() - done as f64;
        if pending <= 0.0 {
            return Ok(0);
        }
        if pending > MAX_WALK_STEPS as f64 {
            return Err(MotionError::WalkTooLong { steps: pending });
        }
        Ok(pending as u64)
    }

    fn draw(&self, index: u64) -> f64 {
        if self.max_step == 0.0 {
            return 0.0;
        }
        let mut rng = Xoshiro256StarStar::seed_from_u64(stream_seed(self.seed, index));
        rng.gen_range(-self.max_step..=self.max_step)
    }

    /// Replay steps `first .. first + steps` starting from `start`.
    pub(crate) fn replay(&self, start: f64, center: f64, first: u64, steps: u64) -> WalkOutcome {
        let low = center - self.bound;
        let high = center + self.bound;
        let mut position = start.clamp(low, high);
        let mut last_step = 0.0;
        for index in first..first + steps {
            let next = (position + self.draw(index)).clamp(low, high);
            last_step = next - position;
            position = next;
        }
        tracing::trace!(first, steps, seed = self.seed, position, "replayed random walk");
        WalkOutcome {
            position,
            last_step,
        }
    }
}

// splitmix64 finaliser over the seed and step index
fn stream_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
