//! Physical constants, unit conversions and thresholds used by the calculators

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Degrees to radians
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Full circle in degrees, the wrap limit for bearings
pub const FULL_CIRCLE_DEG: f64 = 360.0;

/// Half circle in degrees, the wrap limit for signed angle deltas
pub const HALF_CIRCLE_DEG: f64 = 180.0;

// Unit conversions

/// Conversion factor: knots to meters per second
pub const KTS_TO_MPS: f64 = 0.514444;

/// Conversion factor: feet to meters
pub const FT_TO_M: f64 = 0.3048;

/// Conversion factor: meters to feet
pub const M_TO_FT: f64 = 3.28084;

/// Meters in one nautical mile
pub const METERS_PER_NM: f64 = 1852.0;

/// Feet in one nautical mile, as used for path-angle geometry
pub const FEET_PER_NM: f64 = 6076.12;

/// Feet in one nautical mile, as used by the glide reach estimate.
///
/// Slightly coarser than [`FEET_PER_NM`]; the glide output is calibrated
/// against this value so the two are kept apart.
pub const FEET_PER_NM_GLIDE: f64 = 6076.0;

/// Offset between Celsius and Kelvin
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

// Sentinel outputs for degenerate geometry.
//
// Displays compare against these values to blank or saturate a readout, so
// they must stay bit-identical across releases.

/// Turn radius reported when wings are level (nm)
pub const INFINITE_RADIUS_NM: f64 = 999.9;

/// Turn radius reported when wings are level (ft)
pub const INFINITE_RADIUS_FT: f64 = 999900.0;

/// Time reported when a turn or altitude change never completes
/// (seconds for turns, minutes for VNAV)
pub const INFINITE_TIME: f64 = 999.9;

// Turn performance

/// Standard rate turn (degrees per second)
pub const STANDARD_RATE_DPS: f64 = 3.0;

/// Below this |tan(bank)| the aircraft is treated as wings level
pub const MIN_TAN_BANK_THRESHOLD: f64 = 0.001;

/// Below this turn rate (deg/s) the time-to-turn saturates
pub const MIN_TURN_RATE_THRESHOLD: f64 = 0.01;

// Vertical navigation

/// Converts groundspeed (kt) times tan(path angle) into vertical speed (fpm).
///
/// 6076.12 ft/nm / 60 min/h = 101.27
pub const VS_CONVERSION_FACTOR: f64 = 101.27;

/// Reference glide path for top-of-descent planning (degrees)
pub const REFERENCE_PATH_DEG: f64 = 3.0;

/// Floor applied to distance-to-constraint before dividing (nm)
pub const MIN_DISTANCE_NM: f64 = 0.01;

/// Floor applied to groundspeed before dividing (kt)
pub const MIN_GROUNDSPEED_KTS: f64 = 1.0;

/// Below this |VS| (fpm) the time-to-constraint saturates; also the
/// altitude change (ft) below which distance per 1000 ft is zero
pub const MIN_VS_FOR_TIME_CALC: f64 = 1.0;

// Atmosphere

/// ISA sea-level temperature (°C)
pub const ISA_SEA_LEVEL_TEMP_C: f64 = 15.0;

/// ISA temperature lapse rate (°C per foot)
pub const ISA_LAPSE_RATE_C_PER_FT: f64 = 0.0019812;

/// Empirical density altitude factor (ft per °C of ISA deviation).
///
/// DA = PA + 120 × (OAT − ISA) is the classic linear approximation, good to
/// about 1 %. Reference outputs depend on it; do not replace it with an
/// exact root solve.
pub const DENSITY_ALTITUDE_FACTOR: f64 = 120.0;

/// Pressure ratio power law coefficient (per foot)
pub const PRESSURE_RATIO_COEFF: f64 = 6.8756e-6;

/// Pressure ratio power law exponent
pub const PRESSURE_RATIO_EXPONENT: f64 = 5.2559;

/// Below this IAS (kt) the TAS/IAS ratio is reported as 1.0
pub const MIN_IAS_FOR_RATIO_KTS: f64 = 10.0;

/// Typical pressure altitude envelope (ft); values outside are logged
pub const TYPICAL_PRESSURE_ALT_RANGE_FT: (f64, f64) = (-2000.0, 60000.0);

/// Typical OAT envelope (°C); values outside are logged
pub const TYPICAL_OAT_RANGE_C: (f64, f64) = (-60.0, 60.0);

// Envelope, energy and glide

/// Margin reported when the reference speed is not positive (%)
pub const NO_LIMIT_MARGIN_PCT: f64 = 100.0;

/// Maximum load factor used for the corner speed estimate (transport category)
pub const CORNER_LOAD_FACTOR: f64 = 2.5;

/// Deadband around zero energy rate (ft/min) reported as stable
pub const ENERGY_TREND_DEADBAND_FPM: f64 = 50.0;

/// Glide ratio (L/D) assumed for glide reach.
///
/// Light aircraft sit near 8:1, jets near 15:1. Not an aircraft polar.
pub const GLIDE_RATIO: f64 = 12.0;

/// Best glide speed assumed for the wind correction of glide reach (kt)
pub const BEST_GLIDE_SPEED_KTS: f64 = 75.0;

/// Sample IAS history (kt) used when the caller supplies none
pub const SAMPLE_IAS_HISTORY_KTS: [f64; 6] = [145.5, 148.0, 151.2, 149.5, 155.8, 152.1];

// Process exit codes

/// Successful computation
pub const EXIT_SUCCESS: i32 = 0;

/// Wrong number of arguments
pub const EXIT_INVALID_ARGS: i32 = 1;

/// A numeric token failed to parse
pub const EXIT_PARSE_FAILED: i32 = 2;

/// A value parsed but lies outside its domain
pub const EXIT_INVALID_VALUE: i32 = 3;

/// The result could not be written to stdout
pub const EXIT_OUTPUT_FAILED: i32 = 4;
