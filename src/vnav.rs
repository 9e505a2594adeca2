//! Vertical path guidance towards an altitude constraint.

use log::debug;
use serde::Serialize;

use crate::constants::{
    DEG_TO_RAD, FEET_PER_NM, INFINITE_TIME, MIN_DISTANCE_NM, MIN_GROUNDSPEED_KTS,
    MIN_VS_FOR_TIME_CALC, RAD_TO_DEG, REFERENCE_PATH_DEG, VS_CONVERSION_FACTOR,
};

/// Vertical navigation guidance.
///
/// Path angle and required VS are positive for a climb. `time_to_constraint_min`
/// holds [`INFINITE_TIME`] when the current vertical speed is essentially zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VNAVData {
    /// Current minus target altitude, positive when descending (ft)
    pub altitude_to_lose_ft: f64,
    pub flight_path_angle_deg: f64,
    pub required_vs_fpm: f64,
    /// Distance needed to lose the altitude on a 3° path (nm)
    pub tod_distance_nm: f64,
    pub time_to_constraint_min: f64,
    pub distance_per_1000ft: f64,
    /// Rate of descent on a 3° path at this groundspeed; positive for a
    /// descent and sign-flipped for a climb
    pub vs_for_3deg: f64,
    pub is_descent: bool,
}

impl VNAVData {
    /// True when the constraint is never reached at the current vertical speed.
    pub fn is_time_saturated(&self) -> bool {
        self.time_to_constraint_min == INFINITE_TIME
    }
}

/// Vertical speed (fpm) that holds a path of `gamma_rad` at `groundspeed_kts`.
fn vertical_speed_for_path(groundspeed_kts: f64, gamma_rad: f64) -> f64 {
    VS_CONVERSION_FACTOR * groundspeed_kts * gamma_rad.tan()
}

/// Calculate VNAV guidance to a constraint.
///
/// # Arguments
/// * `current_alt_ft` - Current altitude
/// * `target_alt_ft` - Constraint altitude
/// * `distance_nm` - Distance to the constraint, floored at 0.01 nm
/// * `groundspeed_kts` - Groundspeed, floored at 1 kt
/// * `current_vs_fpm` - Current vertical speed
pub fn calculate_vnav(
    current_alt_ft: f64,
    target_alt_ft: f64,
    distance_nm: f64,
    groundspeed_kts: f64,
    current_vs_fpm: f64,
) -> VNAVData {
    let altitude_change_ft = target_alt_ft - current_alt_ft;
    let is_descent = altitude_change_ft < 0.0;
    let abs_alt_change = altitude_change_ft.abs();

    let distance_nm = distance_nm.max(MIN_DISTANCE_NM);
    let groundspeed_kts = groundspeed_kts.max(MIN_GROUNDSPEED_KTS);

    let gamma_rad = (altitude_change_ft / (distance_nm * FEET_PER_NM)).atan();
    let reference_rad = REFERENCE_PATH_DEG * DEG_TO_RAD;

    let tod_distance_nm = abs_alt_change / (FEET_PER_NM * reference_rad.tan());

    let mut vs_for_3deg = vertical_speed_for_path(groundspeed_kts, reference_rad);
    if !is_descent {
        vs_for_3deg = -vs_for_3deg;
    }

    let time_to_constraint_min = if current_vs_fpm.abs() > MIN_VS_FOR_TIME_CALC {
        altitude_change_ft / current_vs_fpm
    } else {
        debug!("vnav: vertical speed {current_vs_fpm} fpm too low, time saturated");
        INFINITE_TIME
    };

    let distance_per_1000ft = if abs_alt_change > MIN_VS_FOR_TIME_CALC {
        distance_nm * 1000.0 / abs_alt_change
    } else {
        0.0
    };

    VNAVData {
        altitude_to_lose_ft: -altitude_change_ft,
        flight_path_angle_deg: gamma_rad * RAD_TO_DEG,
        required_vs_fpm: vertical_speed_for_path(groundspeed_kts, gamma_rad),
        tod_distance_nm,
        time_to_constraint_min,
        distance_per_1000ft,
        vs_for_3deg,
        is_descent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_descent_from_cruise() {
        let vnav = calculate_vnav(35000.0, 10000.0, 100.0, 450.0, -1500.0);
        assert!(vnav.is_descent);
        assert_eq!(vnav.altitude_to_lose_ft, 25000.0);
        assert!(vnav.flight_path_angle_deg < 0.0);
        assert!(vnav.required_vs_fpm < 0.0);
        assert_relative_eq!(vnav.time_to_constraint_min, 25000.0 / 1500.0, epsilon = 1e-9);
        assert_relative_eq!(vnav.distance_per_1000ft, 4.0, epsilon = 1e-9);
        // ~318 ft/nm on a 3° path
        assert!((vnav.tod_distance_nm - 78.5).abs() < 0.1);
        assert!(vnav.vs_for_3deg > 0.0);
    }

    #[test]
    fn test_climb_sign_convention() {
        let vnav = calculate_vnav(5000.0, 12000.0, 40.0, 200.0, 800.0);
        assert!(!vnav.is_descent);
        assert!(vnav.flight_path_angle_deg > 0.0);
        assert!(vnav.required_vs_fpm > 0.0);
        assert!(vnav.vs_for_3deg < 0.0);
        assert_eq!(vnav.altitude_to_lose_ft, -7000.0);
    }

    #[test]
    fn test_level_is_not_descent() {
        let vnav = calculate_vnav(8000.0, 8000.0, 20.0, 150.0, 0.0);
        assert!(!vnav.is_descent);
        assert_eq!(vnav.distance_per_1000ft, 0.0);
        assert_eq!(vnav.tod_distance_nm, 0.0);
        assert!(vnav.is_time_saturated());
    }

    #[test]
    fn test_zero_distance_and_speed_are_floored() {
        let vnav = calculate_vnav(3000.0, 2000.0, 0.0, 0.0, -500.0);
        assert!(vnav.flight_path_angle_deg.is_finite());
        assert!(vnav.required_vs_fpm.is_finite());
        assert!(vnav.flight_path_angle_deg > -90.0);

        let floored = calculate_vnav(3000.0, 2000.0, MIN_DISTANCE_NM, MIN_GROUNDSPEED_KTS, -500.0);
        assert_eq!(vnav, floored);
    }

    #[test]
    fn test_tod_independent_of_actual_path() {
        let near = calculate_vnav(20000.0, 5000.0, 10.0, 300.0, -2000.0);
        let far = calculate_vnav(20000.0, 5000.0, 200.0, 300.0, -2000.0);
        assert_eq!(near.tod_distance_nm, far.tod_distance_nm);
        assert!(near.flight_path_angle_deg < far.flight_path_angle_deg);
    }

    #[test]
    fn test_required_vs_on_three_degree_path() {
        // Place the constraint exactly on a 3° path
        let alt = 3000.0;
        let distance = alt / (FEET_PER_NM * 3.0f64.to_radians().tan());
        let vnav = calculate_vnav(alt, 0.0, distance, 140.0, -700.0);
        assert_relative_eq!(vnav.flight_path_angle_deg, -3.0, epsilon = 1e-9);
        assert_relative_eq!(vnav.required_vs_fpm, -vnav.vs_for_3deg, epsilon = 1e-6);
        assert_relative_eq!(vnav.tod_distance_nm, distance, epsilon = 1e-9);
    }
}
