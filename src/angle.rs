//! Angle normalization and 2-D wind-triangle vectors.
//!
//! Bearings are measured clockwise from north. A polar (direction, speed)
//! pair maps to `(east, north) = (speed·sin θ, speed·cos θ)`, so the vector
//! `x` component is east and `y` is north.

use nalgebra::Vector2;

use crate::constants::{DEG_TO_RAD, FULL_CIRCLE_DEG, HALF_CIRCLE_DEG, RAD_TO_DEG};

/// Normalize an angle in degrees to `[0, 360)`.
///
/// A single remainder operation, so execution time does not depend on the
/// magnitude of the input.
pub fn normalize_angle(angle_deg: f64) -> f64 {
    let mut result = angle_deg % FULL_CIRCLE_DEG;
    if result < 0.0 {
        result += FULL_CIRCLE_DEG;
    }
    // -1e-20 + 360 rounds to exactly 360
    if result >= FULL_CIRCLE_DEG {
        result = 0.0;
    }
    result
}

/// Normalize an angle in degrees to the signed range `(-180, 180]`, the
/// shortest rotation that reaches it.
pub fn normalize_signed(angle_deg: f64) -> f64 {
    let result = normalize_angle(angle_deg);
    if result > HALF_CIRCLE_DEG {
        result - FULL_CIRCLE_DEG
    } else {
        result
    }
}

/// A bearing or course, kept normalized to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AngleDeg(f64);

impl AngleDeg {
    pub fn new(degrees: f64) -> Self {
        AngleDeg(normalize_angle(degrees))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0 * DEG_TO_RAD
    }

    /// Signed rotation from `other` to `self`, in `(-180, 180]`.
    pub fn delta_from(self, other: AngleDeg) -> f64 {
        normalize_signed(self.0 - other.0)
    }
}

impl From<f64> for AngleDeg {
    fn from(degrees: f64) -> Self {
        AngleDeg::new(degrees)
    }
}

/// Convert a polar (bearing, magnitude) pair into an east/north vector.
pub fn polar_to_vector(bearing_deg: f64, magnitude: f64) -> Vector2<f64> {
    let theta = bearing_deg * DEG_TO_RAD;
    Vector2::new(magnitude * theta.sin(), magnitude * theta.cos())
}

/// Bearing the vector points towards, normalized to `[0, 360)`.
///
/// The zero vector has bearing 0.
pub fn vector_bearing(v: &Vector2<f64>) -> f64 {
    normalize_angle(v.x.atan2(v.y) * RAD_TO_DEG)
}
