//! Flight envelope margins, specific energy and glide reach.

use log::debug;
use serde::{Serialize, Serializer};

use crate::constants::{
    BEST_GLIDE_SPEED_KTS, CORNER_LOAD_FACTOR, ENERGY_TREND_DEADBAND_FPM, FEET_PER_NM_GLIDE,
    FT_TO_M, GLIDE_RATIO, G_ACCEL_MPS2, KTS_TO_MPS, M_TO_FT, NO_LIMIT_MARGIN_PCT,
};
use crate::turn::load_factor;

/// Proximity to the speed limits of the envelope, in percent.
///
/// A margin whose reference speed is not positive reads
/// [`NO_LIMIT_MARGIN_PCT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvelopeMargins {
    /// Above the stall speed at the current load factor
    pub stall_margin_pct: f64,
    /// Below VMO / VNE
    pub vmo_margin_pct: f64,
    /// Below MMO
    pub mmo_margin_pct: f64,
    /// The most limiting of the three
    pub min_margin_pct: f64,
    pub corner_speed_kts: f64,
    pub load_factor: f64,
}

/// Direction the total energy is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum EnergyTrend {
    Decreasing = -1,
    Stable = 0,
    Increasing = 1,
}

impl EnergyTrend {
    /// Categorize an energy rate (ft/min) with a ±50 ft/min deadband.
    pub fn from_rate(rate_fpm: f64) -> Self {
        if rate_fpm > ENERGY_TREND_DEADBAND_FPM {
            EnergyTrend::Increasing
        } else if rate_fpm < -ENERGY_TREND_DEADBAND_FPM {
            EnergyTrend::Decreasing
        } else {
            EnergyTrend::Stable
        }
    }
}

// Displays consume the trend as -1 / 0 / 1
impl Serialize for EnergyTrend {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(*self as i8)
    }
}

/// Specific (height-equivalent) energy state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyData {
    pub specific_energy_ft: f64,
    #[serde(rename = "energy_rate_fpm")]
    pub specific_energy_rate: f64,
    pub trend: EnergyTrend,
}

/// Unpowered glide reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlideData {
    pub max_range_nm: f64,
    #[serde(rename = "range_with_wind_nm")]
    pub max_range_with_wind_nm: f64,
    pub glide_ratio: f64,
    pub best_glide_speed_kts: f64,
}

/// `(limit − value) / limit` as a percentage, or 100 % with no limit.
fn margin_below(limit: f64, value: f64) -> f64 {
    if limit > 0.0 {
        (limit - value) / limit * 100.0
    } else {
        NO_LIMIT_MARGIN_PCT
    }
}

/// Calculate envelope margins.
///
/// # Arguments
/// * `bank_deg` - Bank angle, sets the load factor
/// * `ias_kts` - Indicated airspeed
/// * `mach` - Current Mach number
/// * `vso_kts` - 1 g stall speed
/// * `vne_kts` - Maximum operating / never exceed speed
/// * `mmo` - Maximum operating Mach
pub fn calculate_envelope(
    bank_deg: f64,
    ias_kts: f64,
    mach: f64,
    vso_kts: f64,
    vne_kts: f64,
    mmo: f64,
) -> EnvelopeMargins {
    let load_factor = load_factor(bank_deg);

    // Vs_n = Vs_1g·√n
    let stall_speed = vso_kts * load_factor.sqrt();
    let stall_margin_pct = if stall_speed > 0.0 {
        (ias_kts - stall_speed) / stall_speed * 100.0
    } else {
        NO_LIMIT_MARGIN_PCT
    };
    let vmo_margin_pct = margin_below(vne_kts, ias_kts);
    let mmo_margin_pct = margin_below(mmo, mach);

    let min_margin_pct = stall_margin_pct.min(vmo_margin_pct).min(mmo_margin_pct);
    debug!(
        "envelope: n={load_factor:.3} stall={stall_margin_pct:.1}% vmo={vmo_margin_pct:.1}% mmo={mmo_margin_pct:.1}%"
    );

    EnvelopeMargins {
        stall_margin_pct,
        vmo_margin_pct,
        mmo_margin_pct,
        min_margin_pct,
        corner_speed_kts: vso_kts * CORNER_LOAD_FACTOR.sqrt(),
        load_factor,
    }
}

/// Calculate specific energy `Es = V²/2g + h`.
///
/// The rate is the vertical speed alone; there is no acceleration term.
pub fn calculate_energy(tas_kts: f64, altitude_ft: f64, vs_fpm: f64) -> EnergyData {
    let v_mps = tas_kts * KTS_TO_MPS;
    let kinetic_height_m = v_mps * v_mps / (2.0 * G_ACCEL_MPS2);
    let specific_energy_m = kinetic_height_m + altitude_ft * FT_TO_M;

    EnergyData {
        specific_energy_ft: specific_energy_m * M_TO_FT,
        specific_energy_rate: vs_fpm,
        trend: EnergyTrend::from_rate(vs_fpm),
    }
}

/// Estimate glide reach from height above ground.
///
/// Uses a fixed 12:1 glide ratio and 75 kt best glide speed rather than an
/// aircraft polar. A headwind (positive) shortens the range; the wind
/// adjusted range never goes below zero.
pub fn calculate_glide_reach(agl_ft: f64, headwind_kts: f64) -> GlideData {
    let max_range_nm = agl_ft / FEET_PER_NM_GLIDE * GLIDE_RATIO;

    let wind_factor = 1.0 - headwind_kts / BEST_GLIDE_SPEED_KTS;

    GlideData {
        max_range_nm,
        max_range_with_wind_nm: (max_range_nm * wind_factor).max(0.0),
        glide_ratio: GLIDE_RATIO,
        best_glide_speed_kts: BEST_GLIDE_SPEED_KTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_reference_speeds_gives_full_margins() {
        let env = calculate_envelope(30.0, 120.0, 0.3, 0.0, -1.0, 0.0);
        assert_eq!(env.stall_margin_pct, 100.0);
        assert_eq!(env.vmo_margin_pct, 100.0);
        assert_eq!(env.mmo_margin_pct, 100.0);
        assert_eq!(env.min_margin_pct, 100.0);
    }

    #[test]
    fn test_margins_level_flight() {
        let env = calculate_envelope(0.0, 150.0, 0.4, 100.0, 200.0, 0.8);
        assert_eq!(env.load_factor, 1.0);
        assert_relative_eq!(env.stall_margin_pct, 50.0, epsilon = 1e-9);
        assert_relative_eq!(env.vmo_margin_pct, 25.0, epsilon = 1e-9);
        assert_relative_eq!(env.mmo_margin_pct, 50.0, epsilon = 1e-9);
        assert_relative_eq!(env.min_margin_pct, 25.0, epsilon = 1e-9);
        assert_relative_eq!(env.corner_speed_kts, 100.0 * 2.5f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_bank_raises_stall_speed() {
        let level = calculate_envelope(0.0, 120.0, 0.3, 60.0, 250.0, 0.8);
        let banked = calculate_envelope(60.0, 120.0, 0.3, 60.0, 250.0, 0.8);
        assert_relative_eq!(banked.load_factor, 2.0, epsilon = 1e-9);
        assert!(banked.stall_margin_pct < level.stall_margin_pct);
        // 60 kt × √2 = 84.85 kt
        assert_relative_eq!(banked.stall_margin_pct, (120.0 / (60.0 * 2.0f64.sqrt()) - 1.0) * 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_overspeed_is_negative_and_most_limiting() {
        let env = calculate_envelope(0.0, 260.0, 0.5, 60.0, 250.0, 0.8);
        assert!(env.vmo_margin_pct < 0.0);
        assert_eq!(env.min_margin_pct, env.vmo_margin_pct);
    }

    #[test]
    fn test_energy_trend_deadband() {
        assert_eq!(EnergyTrend::from_rate(0.0), EnergyTrend::Stable);
        assert_eq!(EnergyTrend::from_rate(50.0), EnergyTrend::Stable);
        assert_eq!(EnergyTrend::from_rate(-50.0), EnergyTrend::Stable);
        assert_eq!(EnergyTrend::from_rate(50.1), EnergyTrend::Increasing);
        assert_eq!(EnergyTrend::from_rate(-50.1), EnergyTrend::Decreasing);
    }

    #[test]
    fn test_specific_energy() {
        let energy = calculate_energy(0.0, 10000.0, -800.0);
        assert_relative_eq!(energy.specific_energy_ft, 10000.0, epsilon = 1e-2);
        assert_eq!(energy.specific_energy_rate, -800.0);
        assert_eq!(energy.trend, EnergyTrend::Decreasing);

        // 200 kt adds roughly 1770 ft of kinetic height
        let energy = calculate_energy(200.0, 0.0, 0.0);
        assert!((energy.specific_energy_ft - 1770.0).abs() < 10.0);
        assert_eq!(energy.trend, EnergyTrend::Stable);
    }

    #[test]
    fn test_trend_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&EnergyTrend::Decreasing).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&EnergyTrend::Stable).unwrap(), "0");
        assert_eq!(serde_json::to_string(&EnergyTrend::Increasing).unwrap(), "1");
    }

    #[test]
    fn test_glide_still_air_and_wind() {
        let glide = calculate_glide_reach(6076.0, 0.0);
        assert_relative_eq!(glide.max_range_nm, 12.0, epsilon = 1e-12);
        assert_relative_eq!(glide.max_range_with_wind_nm, 12.0, epsilon = 1e-12);
        assert_eq!(glide.glide_ratio, 12.0);
        assert_eq!(glide.best_glide_speed_kts, 75.0);

        let into_wind = calculate_glide_reach(6076.0, 15.0);
        assert_relative_eq!(into_wind.max_range_with_wind_nm, 12.0 * 0.8, epsilon = 1e-9);

        let downwind = calculate_glide_reach(6076.0, -15.0);
        assert!(downwind.max_range_with_wind_nm > downwind.max_range_nm);
    }

    #[test]
    fn test_glide_range_floored_at_zero() {
        let glide = calculate_glide_reach(3000.0, 100.0);
        assert_eq!(glide.max_range_with_wind_nm, 0.0);
        assert!(glide.max_range_nm > 0.0);
    }
}
