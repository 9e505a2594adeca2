//! Air-data corrections from pressure altitude and outside air temperature.
//!
//! This module uses the simplified standard-atmosphere relations a flight
//! deck display calibrates against: a linear ISA lapse, the linear density
//! altitude rule and the power-law pressure ratio.

use log::warn;
use serde::Serialize;

use crate::constants::{
    CELSIUS_TO_KELVIN, DENSITY_ALTITUDE_FACTOR, ISA_LAPSE_RATE_C_PER_FT, ISA_SEA_LEVEL_TEMP_C,
    MIN_IAS_FOR_RATIO_KTS, PRESSURE_RATIO_COEFF, PRESSURE_RATIO_EXPONENT,
    TYPICAL_OAT_RANGE_C, TYPICAL_PRESSURE_ALT_RANGE_FT,
};

/// Pressure altitude (ft) at which the power-law pressure ratio reaches zero.
pub const PRESSURE_RATIO_CEILING_FT: f64 = 1.0 / PRESSURE_RATIO_COEFF;

/// Density altitude and related air-data corrections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityAltitudeData {
    pub density_altitude_ft: f64,
    pub pressure_altitude_ft: f64,
    /// σ, density relative to ISA sea level
    pub air_density_ratio: f64,
    /// OAT minus ISA temperature (°C)
    pub temperature_deviation_c: f64,
    pub performance_loss_pct: f64,
    pub eas_kts: f64,
    pub tas_to_ias_ratio: f64,
    pub pressure_ratio: f64,
}

/// ISA temperature (°C) at a pressure altitude.
pub fn isa_temperature_c(pressure_altitude_ft: f64) -> f64 {
    ISA_SEA_LEVEL_TEMP_C - ISA_LAPSE_RATE_C_PER_FT * pressure_altitude_ft
}

/// Density altitude by the linear rule `DA = PA + 120·(OAT − ISA)`.
///
/// Good to about 1 %. Deliberately not the exact root solve.
pub fn density_altitude_ft(pressure_altitude_ft: f64, oat_celsius: f64) -> f64 {
    let deviation = oat_celsius - isa_temperature_c(pressure_altitude_ft);
    pressure_altitude_ft + DENSITY_ALTITUDE_FACTOR * deviation
}

/// Standard-atmosphere pressure ratio `P/P₀ = (1 − 6.8756e-6·h)^5.2559`.
pub fn pressure_ratio(pressure_altitude_ft: f64) -> f64 {
    (1.0 - PRESSURE_RATIO_COEFF * pressure_altitude_ft).powf(PRESSURE_RATIO_EXPONENT)
}

/// Density ratio `σ = (P/P₀)·(T₀/T)` using absolute temperatures.
pub fn density_ratio(pressure_altitude_ft: f64, oat_celsius: f64) -> f64 {
    let temp_k = oat_celsius + CELSIUS_TO_KELVIN;
    let sea_level_temp_k = ISA_SEA_LEVEL_TEMP_C + CELSIUS_TO_KELVIN;
    pressure_ratio(pressure_altitude_ft) * (sea_level_temp_k / temp_k)
}

/// Equivalent airspeed, `EAS = TAS·√σ`.
pub fn equivalent_airspeed(tas_kts: f64, sigma: f64) -> f64 {
    tas_kts * sigma.sqrt()
}

/// Calculate density altitude and air-data corrections.
///
/// Inputs outside the typical operating envelope are logged but still
/// computed.
///
/// # Arguments
/// * `pressure_altitude_ft` - Pressure altitude, below [`PRESSURE_RATIO_CEILING_FT`]
/// * `oat_celsius` - Outside air temperature, above absolute zero
/// * `ias_kts` - Indicated airspeed
/// * `tas_kts` - True airspeed
pub fn calculate_density_altitude(
    pressure_altitude_ft: f64,
    oat_celsius: f64,
    ias_kts: f64,
    tas_kts: f64,
) -> DensityAltitudeData {
    let (pa_min, pa_max) = TYPICAL_PRESSURE_ALT_RANGE_FT;
    if !(pa_min..=pa_max).contains(&pressure_altitude_ft) {
        warn!("pressure altitude {pressure_altitude_ft} ft outside typical range");
    }
    let (oat_min, oat_max) = TYPICAL_OAT_RANGE_C;
    if !(oat_min..=oat_max).contains(&oat_celsius) {
        warn!("temperature {oat_celsius} °C outside typical range");
    }

    let sigma = density_ratio(pressure_altitude_ft, oat_celsius);

    let tas_to_ias_ratio = if ias_kts > MIN_IAS_FOR_RATIO_KTS {
        tas_kts / ias_kts
    } else {
        1.0
    };

    DensityAltitudeData {
        density_altitude_ft: density_altitude_ft(pressure_altitude_ft, oat_celsius),
        pressure_altitude_ft,
        air_density_ratio: sigma,
        temperature_deviation_c: oat_celsius - isa_temperature_c(pressure_altitude_ft),
        performance_loss_pct: (1.0 - sigma) * 100.0,
        eas_kts: equivalent_airspeed(tas_kts, sigma),
        tas_to_ias_ratio,
        pressure_ratio: pressure_ratio(pressure_altitude_ft),
    }
}
