//! Core points, constants, and shared primitives for the drone motion workspace.

use std::ops::{Add, Mul, Sub};

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Gravitational acceleration used by the drone model (m/s²).
    pub const GRAVITY_M_S2: f64 = 9.8;
    /// Air density used by the rotor thrust model (kg/m³).
    pub const AIR_DENSITY_KG_M3: f64 = 1.0;
}

/// Environment values consumed by the vehicle formulas.
///
/// Callers pass this explicitly instead of reading globals, so tests can swap
/// in a different planet or atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub gravity_m_s2: f64,
    pub air_density_kg_m3: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity_m_s2: constants::GRAVITY_M_S2,
            air_density_kg_m3: constants::AIR_DENSITY_KG_M3,
        }
    }
}

/// A position within a three-dimensional reference frame.
///
/// Also used for direction vectors (the difference of two points).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Alias kept for the "frame" vocabulary of the vehicle model.
pub type Frame = Point;

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when every coordinate is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point {
    fn from(v: [f64; 3]) -> Self {
        Point::new(v[0], v[1], v[2])
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Point::new(x, y, z)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        vector::add(&self, &rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        vector::sub(&self, &rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, s: f64) -> Point {
        vector::scale(&self, s)
    }
}

/// Minimal vector helpers to avoid ad-hoc component math everywhere.
pub mod vector {
    use super::Point;

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Point) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Point, b: &Point) -> f64 {
        a.x * b.x + a.y * b.y + a.z * b.z
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Point, b: &Point) -> Point {
        Point::new(a.x + b.x, a.y + b.y, a.z + b.z)
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Point, b: &Point) -> Point {
        Point::new(a.x - b.x, a.y - b.y, a.z - b.z)
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Point, s: f64) -> Point {
        Point::new(v.x * s, v.y * s, v.z * s)
    }

    /// Point at parameter `t` on the segment `a -> b` (`t = 0` is `a`, `t = 1` is `b`).
    #[inline]
    pub fn lerp(a: &Point, b: &Point, t: f64) -> Point {
        add(a, &scale(&sub(b, a), t))
    }
}

/// Angle helpers for attitude values stored in degrees.
pub mod angles {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants_match_reference_values() {
        let c = PhysicalConstants::default();
        assert_eq!(c.gravity_m_s2, 9.8);
        assert_eq!(c.air_density_kg_m3, 1.0);
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(4.0, 6.0, 3.0);
        assert_eq!(b - a, Point::new(3.0, 4.0, 0.0));
        assert_eq!(a + b, Point::new(5.0, 8.0, 6.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0, 6.0));
        assert!((vector::norm(&(b - a)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_hits_endpoints() {
        let a = Point::new(-1.0, 0.5, 2.0);
        let b = Point::new(3.0, -0.5, 2.0);
        assert_eq!(vector::lerp(&a, &b, 0.0), a);
        assert_eq!(vector::lerp(&a, &b, 1.0), b);
        assert_eq!(vector::lerp(&a, &b, 0.5), Point::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn finiteness_check() {
        assert!(Point::ORIGIN.is_finite());
        assert!(!Point::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Point::new(0.0, 0.0, f64::INFINITY).is_finite());
    }
}
