//! Rotor and multi-rotor vehicle descriptors with their closed-form formulas.

use std::fmt;

use drone_core::{PhysicalConstants, Point, angles::deg_to_rad};
use thiserror::Error;

/// Errors raised by vehicle construction or formulas outside their domain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VehicleError {
    #[error("rotor area must be a non-negative number (got {0})")]
    InvalidRotorArea(f64),
    #[error("vehicle mass must be positive (got {0})")]
    InvalidMass(f64),
    #[error("target height {target} m lies below the current height {current} m")]
    TargetBelowCurrent { target: f64, current: f64 },
    #[error("thrust is unbounded at pitch {pitch_deg}° / roll {roll_deg}°")]
    UnboundedThrust { pitch_deg: f64, roll_deg: f64 },
}

/// Allowed spinning directions for each rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

/// A single rotor.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotor {
    /// Blade speed (m/s).
    pub speed_m_s: f64,
    /// Cross-sectional area (m²).
    pub area_m2: f64,
    pub spin: SpinDirection,
}

impl Rotor {
    pub fn new(speed_m_s: f64, area_m2: f64, spin: SpinDirection) -> Result<Self, VehicleError> {
        if !(area_m2.is_finite() && area_m2 >= 0.0) {
            return Err(VehicleError::InvalidRotorArea(area_m2));
        }
        Ok(Self {
            speed_m_s,
            area_m2,
            spin,
        })
    }

    /// Thrust `ρ·A·v²` (N).
    pub fn thrust(&self, constants: &PhysicalConstants) -> f64 {
        constants.air_density_kg_m3 * self.area_m2 * self.speed_m_s * self.speed_m_s
    }

    /// Take-off spins the rotor clockwise.
    pub fn takeoff(&mut self) {
        self.spin = SpinDirection::Clockwise;
    }

    /// Landing spins the rotor counter-clockwise.
    pub fn land(&mut self) {
        self.spin = SpinDirection::CounterClockwise;
    }
}

/// Coarse attitude classification derived from pitch and roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Hovering,
    Forward,
    Backward,
    Left,
    Right,
    PositivePitchAndRoll,
    NegativePitchAndRoll,
    /// Mixed-sign or out-of-range attitudes.
    Unclassified,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Orientation::Hovering => "hovering",
            Orientation::Forward => "forward",
            Orientation::Backward => "backward",
            Orientation::Left => "left",
            Orientation::Right => "right",
            Orientation::PositivePitchAndRoll => "positive pitch and roll",
            Orientation::NegativePitchAndRoll => "negative pitch and roll",
            Orientation::Unclassified => "unclassified",
        };
        f.write_str(label)
    }
}

/// A multi-rotor vehicle. Angles are in degrees; height is the `y` of the body frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    pub name: String,
    pub rotors: Vec<Rotor>,
    pub pitch_deg: f64,
    pub roll_deg: f64,
    pub mass_kg: f64,
    pub body_frame: Point,
}

impl Drone {
    pub fn new(
        name: impl Into<String>,
        rotors: Vec<Rotor>,
        pitch_deg: f64,
        roll_deg: f64,
        mass_kg: f64,
        current_height_m: f64,
    ) -> Result<Self, VehicleError> {
        if !(mass_kg.is_finite() && mass_kg > 0.0) {
            return Err(VehicleError::InvalidMass(mass_kg));
        }
        Ok(Self {
            name: name.into(),
            rotors,
            pitch_deg,
            roll_deg,
            mass_kg,
            body_frame: Point::new(0.0, current_height_m, 0.0),
        })
    }

    pub fn current_height_m(&self) -> f64 {
        self.body_frame.y
    }

    pub fn total_rotor_area_m2(&self) -> f64 {
        self.rotors.iter().map(|r| r.area_m2).sum()
    }

    /// Sum of the individual rotor thrusts (N).
    pub fn rotor_thrust(&self, constants: &PhysicalConstants) -> f64 {
        self.rotors.iter().map(|r| r.thrust(constants)).sum()
    }

    pub fn takeoff(&mut self) {
        self.rotors.iter_mut().for_each(Rotor::takeoff);
    }

    pub fn land(&mut self) {
        self.rotors.iter_mut().for_each(Rotor::land);
    }

    /// Classify the current attitude. Tilts count only strictly inside ±90°.
    ///
    /// The open intervals are deliberate: fractional tilts such as 0.5° are
    /// classified, and the positive and negative ranges mirror each other.
    pub fn orientation(&self) -> Orientation {
        let positive = |a: f64| a > 0.0 && a < 90.0;
        let negative = |a: f64| a < 0.0 && a > -90.0;
        let (pitch, roll) = (self.pitch_deg, self.roll_deg);

        if roll == 0.0 && pitch == 0.0 {
            Orientation::Hovering
        } else if roll == 0.0 && positive(pitch) {
            Orientation::Forward
        } else if roll == 0.0 && negative(pitch) {
            Orientation::Backward
        } else if positive(roll) && pitch == 0.0 {
            Orientation::Left
        } else if negative(roll) && pitch == 0.0 {
            Orientation::Right
        } else if positive(roll) && positive(pitch) {
            Orientation::PositivePitchAndRoll
        } else if negative(roll) && negative(pitch) {
            Orientation::NegativePitchAndRoll
        } else {
            Orientation::Unclassified
        }
    }

    fn climb_m(&self, target_height_m: f64) -> Result<f64, VehicleError> {
        let current = self.current_height_m();
        let climb = target_height_m - current;
        if climb.is_nan() || climb < 0.0 {
            return Err(VehicleError::TargetBelowCurrent {
                target: target_height_m,
                current,
            });
        }
        Ok(climb)
    }

    /// Speed needed to climb to `target_height_m`: `sqrt(4·g·Δh)` (m/s).
    pub fn required_climb_speed(
        &self,
        target_height_m: f64,
        constants: &PhysicalConstants,
    ) -> Result<f64, VehicleError> {
        let climb = self.climb_m(target_height_m)?;
        Ok((4.0 * constants.gravity_m_s2 * climb).sqrt())
    }

    /// Thrust needed to hold the vehicle at `target_height_m` (N):
    /// `ρ·ΣA·Δh + m·g / (cos roll · cos pitch)`.
    pub fn total_generated_thrust(
        &self,
        target_height_m: f64,
        constants: &PhysicalConstants,
    ) -> Result<f64, VehicleError> {
        let climb = self.climb_m(target_height_m)?;
        let tilt = deg_to_rad(self.roll_deg).cos() * deg_to_rad(self.pitch_deg).cos();
        if tilt.abs() < 1e-12 {
            return Err(VehicleError::UnboundedThrust {
                pitch_deg: self.pitch_deg,
                roll_deg: self.roll_deg,
            });
        }
        Ok(constants.air_density_kg_m3 * self.total_rotor_area_m2() * climb
            + self.mass_kg * constants.gravity_m_s2 / tilt)
    }

    /// Magnitude of the thrust along `x` (N): `T·|sin pitch|`.
    ///
    /// This is `sqrt(T²·cos²pitch·(1/cos²pitch − 1))`, whose radicand is never
    /// negative on the domain of [`total_generated_thrust`](Self::total_generated_thrust);
    /// rounding below zero is clamped. The sign of the pitch is not carried.
    pub fn x_generated_thrust(
        &self,
        target_height_m: f64,
        constants: &PhysicalConstants,
    ) -> Result<f64, VehicleError> {
        let total = self.total_generated_thrust(target_height_m, constants)?;
        let cos_pitch = deg_to_rad(self.pitch_deg).cos();
        let radicand = total * total * (1.0 - cos_pitch * cos_pitch);
        Ok(radicand.max(0.0).sqrt())
    }

    /// Thrust along `y` (N): `T·cos pitch·sin roll`.
    pub fn y_generated_thrust(
        &self,
        target_height_m: f64,
        constants: &PhysicalConstants,
    ) -> Result<f64, VehicleError> {
        let total = self.total_generated_thrust(target_height_m, constants)?;
        Ok(total * deg_to_rad(self.pitch_deg).cos() * deg_to_rad(self.roll_deg).sin())
    }

    /// Thrust along `z` (N): `T·cos pitch·cos roll`.
    pub fn z_generated_thrust(
        &self,
        target_height_m: f64,
        constants: &PhysicalConstants,
    ) -> Result<f64, VehicleError> {
        let total = self.total_generated_thrust(target_height_m, constants)?;
        Ok(total * deg_to_rad(self.pitch_deg).cos() * deg_to_rad(self.roll_deg).cos())
    }

    /// The three axis thrusts as a vector.
    pub fn generated_thrust_components(
        &self,
        target_height_m: f64,
        constants: &PhysicalConstants,
    ) -> Result<Point, VehicleError> {
        Ok(Point::new(
            self.x_generated_thrust(target_height_m, constants)?,
            self.y_generated_thrust(target_height_m, constants)?,
            self.z_generated_thrust(target_height_m, constants)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(pitch: f64, roll: f64, height: f64) -> Drone {
        let rotors = (0..4)
            .map(|_| Rotor::new(1.0, 1.0, SpinDirection::Clockwise).unwrap())
            .collect();
        Drone::new("quad", rotors, pitch, roll, 1.0, height).unwrap()
    }

    #[test]
    fn rotor_thrust_is_density_area_speed_squared() {
        let rotor = Rotor::new(3.0, 0.5, SpinDirection::Clockwise).unwrap();
        assert_eq!(rotor.thrust(&PhysicalConstants::default()), 4.5);
        let thin = PhysicalConstants {
            air_density_kg_m3: 0.5,
            ..PhysicalConstants::default()
        };
        assert_eq!(rotor.thrust(&thin), 2.25);
    }

    #[test]
    fn negative_rotor_area_is_rejected() {
        assert_eq!(
            Rotor::new(1.0, -5.0, SpinDirection::Clockwise),
            Err(VehicleError::InvalidRotorArea(-5.0))
        );
    }

    #[test]
    fn mass_must_be_positive() {
        assert!(matches!(
            Drone::new("x", Vec::new(), 0.0, 0.0, 0.0, 0.0),
            Err(VehicleError::InvalidMass(_))
        ));
    }

    #[test]
    fn takeoff_and_land_flip_spin() {
        let mut drone = quad(0.0, 0.0, 0.0);
        drone.land();
        assert!(
            drone
                .rotors
                .iter()
                .all(|r| r.spin == SpinDirection::CounterClockwise)
        );
        drone.takeoff();
        assert!(drone.rotors.iter().all(|r| r.spin == SpinDirection::Clockwise));
    }

    #[test]
    fn required_speed_for_ten_metres() {
        let drone = quad(0.0, 0.0, 0.0);
        let speed = drone
            .required_climb_speed(10.0, &PhysicalConstants::default())
            .unwrap();
        assert!((speed - 19.80).abs() < 0.005, "speed = {speed}");
    }

    #[test]
    fn descending_target_is_rejected() {
        let drone = quad(0.0, 0.0, 20.0);
        assert!(matches!(
            drone.required_climb_speed(10.0, &PhysicalConstants::default()),
            Err(VehicleError::TargetBelowCurrent { .. })
        ));
    }

    #[test]
    fn hover_thrust_balances_weight() {
        let drone = quad(0.0, 0.0, 5.0);
        let thrust = drone
            .total_generated_thrust(5.0, &PhysicalConstants::default())
            .unwrap();
        assert!((thrust - 9.8).abs() < 1e-12);
        let climbing = drone
            .total_generated_thrust(7.0, &PhysicalConstants::default())
            .unwrap();
        // four unit rotors over 2 m
        assert!((climbing - (8.0 + 9.8)).abs() < 1e-12);
    }

    #[test]
    fn vertical_attitude_has_no_finite_thrust() {
        let drone = quad(90.0, 0.0, 0.0);
        assert!(matches!(
            drone.total_generated_thrust(1.0, &PhysicalConstants::default()),
            Err(VehicleError::UnboundedThrust { .. })
        ));
    }

    #[test]
    fn level_hover_thrust_is_all_vertical() {
        let drone = quad(0.0, 0.0, 0.0);
        let env = PhysicalConstants::default();
        assert_eq!(drone.x_generated_thrust(0.0, &env).unwrap(), 0.0);
        assert_eq!(drone.y_generated_thrust(0.0, &env).unwrap(), 0.0);
        assert!((drone.z_generated_thrust(0.0, &env).unwrap() - 9.8).abs() < 1e-12);
    }

    #[test]
    fn pitched_thrust_splits_into_x_and_z() {
        let drone = quad(30.0, 0.0, 0.0);
        let env = PhysicalConstants::default();
        let tan30 = deg_to_rad(30.0).tan();
        let x = drone.x_generated_thrust(0.0, &env).unwrap();
        assert!((x - 9.8 * tan30).abs() < 1e-9, "x = {x}");
        assert_eq!(drone.y_generated_thrust(0.0, &env).unwrap(), 0.0);
        assert!((drone.z_generated_thrust(0.0, &env).unwrap() - 9.8).abs() < 1e-9);

        // the sign of the pitch is dropped
        let backward = quad(-30.0, 0.0, 0.0);
        assert!((backward.x_generated_thrust(0.0, &env).unwrap() - x).abs() < 1e-12);
    }

    #[test]
    fn rolled_thrust_has_signed_y_component() {
        let env = PhysicalConstants::default();
        let tan30 = deg_to_rad(30.0).tan();
        let left = quad(0.0, 30.0, 0.0).y_generated_thrust(0.0, &env).unwrap();
        let right = quad(0.0, -30.0, 0.0).y_generated_thrust(0.0, &env).unwrap();
        assert!((left - 9.8 * tan30).abs() < 1e-9);
        assert!((right + 9.8 * tan30).abs() < 1e-9);
    }

    #[test]
    fn thrust_components_recombine_to_total() {
        let drone = quad(20.0, -35.0, 1.0);
        let env = PhysicalConstants::default();
        let total = drone.total_generated_thrust(6.0, &env).unwrap();
        let parts = drone.generated_thrust_components(6.0, &env).unwrap();
        let magnitude = drone_core::vector::norm(&parts);
        assert!((magnitude - total).abs() < 1e-9, "{magnitude} vs {total}");
    }

    #[test]
    fn axis_thrust_shares_total_thrust_domain() {
        let env = PhysicalConstants::default();
        assert!(matches!(
            quad(90.0, 0.0, 0.0).x_generated_thrust(1.0, &env),
            Err(VehicleError::UnboundedThrust { .. })
        ));
        assert!(matches!(
            quad(0.0, 0.0, 5.0).z_generated_thrust(1.0, &env),
            Err(VehicleError::TargetBelowCurrent { .. })
        ));
    }

    #[test]
    fn orientation_classes() {
        let cases = [
            (0.0, 0.0, Orientation::Hovering),
            (10.0, 0.0, Orientation::Forward),
            (-10.0, 0.0, Orientation::Backward),
            (0.0, 45.0, Orientation::Left),
            (0.0, -45.0, Orientation::Right),
            (5.0, 5.0, Orientation::PositivePitchAndRoll),
            (-5.0, -5.0, Orientation::NegativePitchAndRoll),
            (5.0, -5.0, Orientation::Unclassified),
            (120.0, 0.0, Orientation::Unclassified),
            (0.5, 0.0, Orientation::Forward),
            (-0.5, 0.0, Orientation::Backward),
            (-89.5, 0.0, Orientation::Backward),
            (0.0, -1.5, Orientation::Right),
            (90.0, 0.0, Orientation::Unclassified),
        ];
        for (pitch, roll, expected) in cases {
            assert_eq!(quad(pitch, roll, 0.0).orientation(), expected, "{pitch}/{roll}");
        }
        assert_eq!(Orientation::PositivePitchAndRoll.to_string(), "positive pitch and roll");
    }
}
