//! Coordinated turn geometry.

use log::debug;
use serde::Serialize;

use crate::constants::{
    DEG_TO_RAD, G_ACCEL_MPS2, INFINITE_RADIUS_FT, INFINITE_RADIUS_NM, INFINITE_TIME,
    KTS_TO_MPS, M_TO_FT, METERS_PER_NM, MIN_TAN_BANK_THRESHOLD, MIN_TURN_RATE_THRESHOLD, RAD_TO_DEG,
    STANDARD_RATE_DPS,
};

/// Coordinated turn performance.
///
/// When the bank is essentially wings level the radius fields hold
/// [`INFINITE_RADIUS_NM`] / [`INFINITE_RADIUS_FT`], the time holds
/// [`INFINITE_TIME`] and rate and lead distances are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnData {
    pub radius_nm: f64,
    pub radius_ft: f64,
    pub turn_rate_dps: f64,
    /// Distance before the fix to start the turn
    pub lead_distance_nm: f64,
    pub lead_distance_ft: f64,
    pub time_to_turn_sec: f64,
    pub load_factor: f64,
    /// Bank angle giving a 3°/s turn at this TAS
    pub standard_rate_bank: f64,
}

impl TurnData {
    /// True when the radius saturated because the wings are level.
    pub fn is_wings_level(&self) -> bool {
        self.radius_nm == INFINITE_RADIUS_NM && self.radius_ft == INFINITE_RADIUS_FT
    }

    /// True when the turn never completes at the computed rate.
    pub fn is_time_saturated(&self) -> bool {
        self.time_to_turn_sec == INFINITE_TIME
    }
}

/// Load factor in a level coordinated turn, `n = 1 / cos φ`.
pub fn load_factor(bank_deg: f64) -> f64 {
    1.0 / (bank_deg * DEG_TO_RAD).cos()
}

/// Bank angle (deg) for a standard rate turn, `φ = atan(ω·V / g)`.
pub fn standard_rate_bank(tas_kts: f64) -> f64 {
    let v_mps = tas_kts * KTS_TO_MPS;
    let omega = STANDARD_RATE_DPS * DEG_TO_RAD;
    (omega * v_mps / G_ACCEL_MPS2).atan() * RAD_TO_DEG
}

/// Calculate turn performance.
///
/// # Arguments
/// * `tas_kts` - True airspeed, positive
/// * `bank_deg` - Bank angle, 0 to 90
/// * `course_change_deg` - Heading change to fly
pub fn calculate_turn(tas_kts: f64, bank_deg: f64, course_change_deg: f64) -> TurnData {
    let v_mps = tas_kts * KTS_TO_MPS;
    let phi_rad = bank_deg * DEG_TO_RAD;
    let tan_phi = phi_rad.tan();

    let load_factor = load_factor(bank_deg);
    let standard_rate_bank = standard_rate_bank(tas_kts);

    if tan_phi.abs() < MIN_TAN_BANK_THRESHOLD {
        debug!("turn: bank {bank_deg}° is wings level, radius saturated");
        return TurnData {
            radius_nm: INFINITE_RADIUS_NM,
            radius_ft: INFINITE_RADIUS_FT,
            turn_rate_dps: 0.0,
            lead_distance_nm: 0.0,
            lead_distance_ft: 0.0,
            time_to_turn_sec: INFINITE_TIME,
            load_factor,
            standard_rate_bank,
        };
    }

    // R = V² / (g·tan φ)
    let radius_m = v_mps * v_mps / (G_ACCEL_MPS2 * tan_phi);

    // ω = g·tan φ / V
    let turn_rate_dps = G_ACCEL_MPS2 * tan_phi / v_mps * RAD_TO_DEG;

    // L = R·tan(Δψ / 2)
    let lead_m = radius_m * (course_change_deg * DEG_TO_RAD / 2.0).tan();

    let time_to_turn_sec = if turn_rate_dps.abs() > MIN_TURN_RATE_THRESHOLD {
        course_change_deg / turn_rate_dps
    } else {
        debug!("turn: rate {turn_rate_dps:.4}°/s too low, time saturated");
        INFINITE_TIME
    };

    TurnData {
        radius_nm: radius_m / METERS_PER_NM,
        radius_ft: radius_m * M_TO_FT,
        turn_rate_dps,
        lead_distance_nm: lead_m / METERS_PER_NM,
        lead_distance_ft: lead_m * M_TO_FT,
        time_to_turn_sec,
        load_factor,
        standard_rate_bank,
    }
}
