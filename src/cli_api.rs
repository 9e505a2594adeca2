// CLI API module - validated inputs for each calculator and the combined
// flight performance entry point
use serde::Serialize;

use crate::atmosphere::{calculate_density_altitude, DensityAltitudeData, PRESSURE_RATIO_CEILING_FT};
use crate::constants::{CELSIUS_TO_KELVIN, SAMPLE_IAS_HISTORY_KTS};
use crate::envelope::{
    calculate_energy, calculate_envelope, calculate_glide_reach, EnergyData, EnvelopeMargins,
    GlideData,
};
use crate::error::{FlightCalcError, Result};
use crate::turn::{calculate_turn, TurnData};
use crate::vnav::{calculate_vnav, VNAVData};
use crate::wind::{gust_factor, resolve_wind, wind_from_triangle, WindComponents, WindVector};

/// A calculator driven by positional numeric arguments.
pub trait Calculator: Sized {
    /// Positional argument synopsis
    const USAGE: &'static str;
    type Output: Serialize + FiniteOutput;

    /// Parse and validate positional argument tokens.
    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self>;

    fn calculate(&self) -> Self::Output;

    /// Calculate, rejecting inputs whose result overflows.
    fn evaluate(&self) -> Result<Self::Output> {
        let output = self.calculate();
        match output.fields().into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(FlightCalcError::invalid(name, "is not finite for these inputs")),
            None => Ok(output),
        }
    }
}

/// Results reported only when every numeric field is finite.
pub trait FiniteOutput {
    /// Name and value of every numeric field
    fn fields(&self) -> Vec<(&'static str, f64)>;
}

impl FiniteOutput for WindComponents {
    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("headwind", self.headwind),
            ("crosswind", self.crosswind),
            ("total_wind", self.total_wind),
            ("wca", self.wca),
            ("drift", self.drift),
        ]
    }
}

impl FiniteOutput for TurnData {
    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("radius_nm", self.radius_nm),
            ("radius_ft", self.radius_ft),
            ("turn_rate_dps", self.turn_rate_dps),
            ("lead_distance_nm", self.lead_distance_nm),
            ("lead_distance_ft", self.lead_distance_ft),
            ("time_to_turn_sec", self.time_to_turn_sec),
            ("load_factor", self.load_factor),
            ("standard_rate_bank", self.standard_rate_bank),
        ]
    }
}

impl FiniteOutput for VNAVData {
    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("altitude_to_lose_ft", self.altitude_to_lose_ft),
            ("flight_path_angle_deg", self.flight_path_angle_deg),
            ("required_vs_fpm", self.required_vs_fpm),
            ("tod_distance_nm", self.tod_distance_nm),
            ("time_to_constraint_min", self.time_to_constraint_min),
            ("distance_per_1000ft", self.distance_per_1000ft),
            ("vs_for_3deg", self.vs_for_3deg),
        ]
    }
}

impl FiniteOutput for DensityAltitudeData {
    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("density_altitude_ft", self.density_altitude_ft),
            ("pressure_altitude_ft", self.pressure_altitude_ft),
            ("air_density_ratio", self.air_density_ratio),
            ("temperature_deviation_c", self.temperature_deviation_c),
            ("performance_loss_pct", self.performance_loss_pct),
            ("eas_kts", self.eas_kts),
            ("tas_to_ias_ratio", self.tas_to_ias_ratio),
            ("pressure_ratio", self.pressure_ratio),
        ]
    }
}

impl FiniteOutput for WindVector {
    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("speed_kts", self.speed_kts),
            ("direction_from", self.direction_from),
            ("headwind", self.headwind),
            ("crosswind", self.crosswind),
            ("gust_factor", self.gust_factor),
        ]
    }
}

/// Parse a numeric token. Non-finite values are out of domain.
///
/// Leading whitespace is skipped; anything trailing the number is a parse
/// failure.
pub fn parse_value(name: &'static str, token: &str) -> Result<f64> {
    let value: f64 = token.trim_start().parse().map_err(|_| FlightCalcError::Parse {
        name,
        token: token.to_string(),
    })?;

    if !value.is_finite() {
        return Err(FlightCalcError::invalid(name, "must be finite"));
    }
    Ok(value)
}

/// Check the argument count, then parse every token in order.
pub fn parse_args<S: AsRef<str>, const N: usize>(
    args: &[S],
    names: [&'static str; N],
) -> Result<[f64; N]> {
    if args.len() != N {
        return Err(FlightCalcError::ArgumentCount {
            expected: N,
            found: args.len(),
        });
    }

    let mut values = [0.0; N];
    for ((value, name), token) in values.iter_mut().zip(names).zip(args) {
        *value = parse_value(name, token.as_ref())?;
    }
    Ok(values)
}

/// Parse a comma separated list of airspeeds, e.g. `145.5,148,151.2`.
pub fn parse_ias_history(list: &str) -> Result<Vec<f64>> {
    let history = list
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(|token| parse_value("IAS history", token.trim()))
        .collect::<Result<Vec<f64>>>()?;
    check_history(&history)?;
    Ok(history)
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(FlightCalcError::invalid(name, "cannot be negative"));
    }
    Ok(())
}

fn check_history(history: &[f64]) -> Result<()> {
    history
        .iter()
        .try_for_each(|&ias| check_non_negative("IAS history", ias))
}

// Wind from track, heading and reported wind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindInputs {
    pub track_deg: f64,
    pub heading_deg: f64,
    pub wind_dir_deg: f64,
    pub wind_speed_kts: f64,
}

impl WindInputs {
    pub fn new(track_deg: f64, heading_deg: f64, wind_dir_deg: f64, wind_speed_kts: f64) -> Result<Self> {
        check_non_negative("wind speed", wind_speed_kts)?;
        Ok(Self {
            track_deg,
            heading_deg,
            wind_dir_deg,
            wind_speed_kts,
        })
    }
}

impl Calculator for WindInputs {
    const USAGE: &'static str = "<track> <heading> <wind_dir> <wind_speed>";
    type Output = WindComponents;

    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [track, heading, wind_dir, wind_speed] =
            parse_args(args, ["track angle", "heading", "wind direction", "wind speed"])?;
        Self::new(track, heading, wind_dir, wind_speed)
    }

    fn calculate(&self) -> WindComponents {
        resolve_wind(self.track_deg, self.heading_deg, self.wind_dir_deg, self.wind_speed_kts)
    }
}

// Coordinated turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnInputs {
    pub tas_kts: f64,
    pub bank_deg: f64,
    pub course_change_deg: f64,
}

impl TurnInputs {
    pub fn new(tas_kts: f64, bank_deg: f64, course_change_deg: f64) -> Result<Self> {
        if tas_kts <= 0.0 {
            return Err(FlightCalcError::invalid("TAS", "must be positive"));
        }
        if !(0.0..=90.0).contains(&bank_deg) {
            return Err(FlightCalcError::invalid("bank angle", "must be between 0 and 90 degrees"));
        }
        Ok(Self {
            tas_kts,
            bank_deg,
            course_change_deg,
        })
    }
}

impl Calculator for TurnInputs {
    const USAGE: &'static str = "<tas_kts> <bank_deg> <course_change_deg>";
    type Output = TurnData;

    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [tas, bank, course_change] = parse_args(args, ["TAS", "bank angle", "course change"])?;
        Self::new(tas, bank, course_change)
    }

    fn calculate(&self) -> TurnData {
        calculate_turn(self.tas_kts, self.bank_deg, self.course_change_deg)
    }
}

// Vertical navigation; degenerate distance and speed are floored, not rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VnavInputs {
    pub current_alt_ft: f64,
    pub target_alt_ft: f64,
    pub distance_nm: f64,
    pub groundspeed_kts: f64,
    pub current_vs_fpm: f64,
}

impl Calculator for VnavInputs {
    const USAGE: &'static str =
        "<current_alt_ft> <target_alt_ft> <distance_nm> <groundspeed_kts> <current_vs_fpm>";
    type Output = VNAVData;

    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [current_alt_ft, target_alt_ft, distance_nm, groundspeed_kts, current_vs_fpm] = parse_args(
            args,
            [
                "current altitude",
                "target altitude",
                "distance",
                "groundspeed",
                "vertical speed",
            ],
        )?;
        Ok(Self {
            current_alt_ft,
            target_alt_ft,
            distance_nm,
            groundspeed_kts,
            current_vs_fpm,
        })
    }

    fn calculate(&self) -> VNAVData {
        calculate_vnav(
            self.current_alt_ft,
            self.target_alt_ft,
            self.distance_nm,
            self.groundspeed_kts,
            self.current_vs_fpm,
        )
    }
}

// Density altitude and air-data corrections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityAltitudeInputs {
    pub pressure_alt_ft: f64,
    pub oat_celsius: f64,
    pub ias_kts: f64,
    pub tas_kts: f64,
}

impl DensityAltitudeInputs {
    pub fn new(pressure_alt_ft: f64, oat_celsius: f64, ias_kts: f64, tas_kts: f64) -> Result<Self> {
        if pressure_alt_ft >= PRESSURE_RATIO_CEILING_FT {
            return Err(FlightCalcError::invalid(
                "pressure altitude",
                format!("must be below {PRESSURE_RATIO_CEILING_FT:.0} ft"),
            ));
        }
        if oat_celsius <= -CELSIUS_TO_KELVIN {
            return Err(FlightCalcError::invalid("temperature", "must be above absolute zero"));
        }
        check_non_negative("IAS", ias_kts)?;
        check_non_negative("TAS", tas_kts)?;
        Ok(Self {
            pressure_alt_ft,
            oat_celsius,
            ias_kts,
            tas_kts,
        })
    }
}

impl Calculator for DensityAltitudeInputs {
    const USAGE: &'static str = "<pressure_alt_ft> <oat_celsius> <ias_kts> <tas_kts>";
    type Output = DensityAltitudeData;

    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [pressure_alt, oat, ias, tas] =
            parse_args(args, ["pressure altitude", "temperature", "IAS", "TAS"])?;
        Self::new(pressure_alt, oat, ias, tas)
    }

    fn calculate(&self) -> DensityAltitudeData {
        calculate_density_altitude(self.pressure_alt_ft, self.oat_celsius, self.ias_kts, self.tas_kts)
    }
}

// Wind triangle from air and ground vectors
#[derive(Debug, Clone, PartialEq)]
pub struct WindTriangleInputs {
    pub tas_kts: f64,
    pub gs_kts: f64,
    pub heading_deg: f64,
    pub track_deg: f64,
    pub ias_history: Vec<f64>,
}

impl WindTriangleInputs {
    pub fn new(tas_kts: f64, gs_kts: f64, heading_deg: f64, track_deg: f64) -> Result<Self> {
        check_non_negative("TAS", tas_kts)?;
        check_non_negative("groundspeed", gs_kts)?;
        Ok(Self {
            tas_kts,
            gs_kts,
            heading_deg,
            track_deg,
            ias_history: Vec::new(),
        })
    }

    pub fn with_ias_history(mut self, history: Vec<f64>) -> Result<Self> {
        check_history(&history)?;
        self.ias_history = history;
        Ok(self)
    }
}

impl Calculator for WindTriangleInputs {
    const USAGE: &'static str = "<tas_kts> <gs_kts> <heading> <track>";
    type Output = WindVector;

    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [tas, gs, heading, track] = parse_args(args, ["TAS", "groundspeed", "heading", "track"])?;
        Self::new(tas, gs, heading, track)
    }

    fn calculate(&self) -> WindVector {
        wind_from_triangle(
            self.tas_kts,
            self.gs_kts,
            self.heading_deg,
            self.track_deg,
            &self.ias_history,
        )
    }
}

/// Gust factor over a list of IAS samples. Any number of samples, zero
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct GustInputs {
    pub ias_history: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GustData {
    pub gust_factor: f64,
    pub samples: usize,
}

impl FiniteOutput for GustData {
    fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![("gust_factor", self.gust_factor)]
    }
}

impl Calculator for GustInputs {
    const USAGE: &'static str = "[ias_kts ...]";
    type Output = GustData;

    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let ias_history = args
            .iter()
            .map(|token| parse_value("IAS", token.as_ref()))
            .collect::<Result<Vec<f64>>>()?;
        check_history(&ias_history)?;
        Ok(Self { ias_history })
    }

    fn calculate(&self) -> GustData {
        GustData {
            gust_factor: gust_factor(&self.ias_history),
            samples: self.ias_history.len(),
        }
    }
}

/// The fourteen inputs of the combined flight performance calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightInputs {
    pub tas_kts: f64,
    pub gs_kts: f64,
    pub heading_deg: f64,
    pub track_deg: f64,
    pub ias_kts: f64,
    pub mach: f64,
    pub altitude_ft: f64,
    pub agl_ft: f64,
    pub vs_fpm: f64,
    /// Accepted for interface compatibility; no model uses weight yet
    pub weight_kg: f64,
    pub bank_deg: f64,
    pub vso_kts: f64,
    pub vne_kts: f64,
    pub mmo: f64,
    pub ias_history: Vec<f64>,
}

impl FlightInputs {
    pub fn with_ias_history(mut self, history: Vec<f64>) -> Result<Self> {
        check_history(&history)?;
        self.ias_history = history;
        Ok(self)
    }

    fn validate(self) -> Result<Self> {
        check_non_negative("TAS", self.tas_kts)?;
        check_non_negative("groundspeed", self.gs_kts)?;
        check_non_negative("IAS", self.ias_kts)?;
        check_non_negative("mach", self.mach)?;
        check_non_negative("AGL altitude", self.agl_ft)?;
        if !(0.0..90.0).contains(&self.bank_deg) {
            return Err(FlightCalcError::invalid("bank angle", "must be at least 0 and below 90 degrees"));
        }
        Ok(self)
    }
}

/// Combined wind, envelope, energy and glide results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightPerformance {
    pub wind: WindVector,
    pub envelope: EnvelopeMargins,
    pub energy: EnergyData,
    pub glide: GlideData,
}

impl FiniteOutput for FlightPerformance {
    fn fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = self.wind.fields();
        fields.extend([
            ("stall_margin_pct", self.envelope.stall_margin_pct),
            ("vmo_margin_pct", self.envelope.vmo_margin_pct),
            ("mmo_margin_pct", self.envelope.mmo_margin_pct),
            ("min_margin_pct", self.envelope.min_margin_pct),
            ("corner_speed_kts", self.envelope.corner_speed_kts),
            ("load_factor", self.envelope.load_factor),
            ("specific_energy_ft", self.energy.specific_energy_ft),
            ("energy_rate_fpm", self.energy.specific_energy_rate),
            ("max_range_nm", self.glide.max_range_nm),
            ("range_with_wind_nm", self.glide.max_range_with_wind_nm),
            ("glide_ratio", self.glide.glide_ratio),
            ("best_glide_speed_kts", self.glide.best_glide_speed_kts),
        ]);
        fields
    }
}

impl Calculator for FlightInputs {
    const USAGE: &'static str = "<tas_kts> <gs_kts> <heading> <track> <ias_kts> <mach> <altitude_ft> \
                                 <agl_ft> <vs_fpm> <weight_kg> <bank_deg> <vso_kts> <vne_kts> <mmo>";
    type Output = FlightPerformance;

    fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [tas_kts, gs_kts, heading_deg, track_deg, ias_kts, mach, altitude_ft, agl_ft, vs_fpm, weight_kg, bank_deg, vso_kts, vne_kts, mmo] =
            parse_args(
                args,
                [
                    "TAS",
                    "groundspeed",
                    "heading",
                    "track",
                    "IAS",
                    "mach",
                    "altitude",
                    "AGL altitude",
                    "vertical speed",
                    "weight",
                    "bank angle",
                    "VSO",
                    "VNE",
                    "MMO",
                ],
            )?;

        FlightInputs {
            tas_kts,
            gs_kts,
            heading_deg,
            track_deg,
            ias_kts,
            mach,
            altitude_ft,
            agl_ft,
            vs_fpm,
            weight_kg,
            bank_deg,
            vso_kts,
            vne_kts,
            mmo,
            ias_history: SAMPLE_IAS_HISTORY_KTS.to_vec(),
        }
        .validate()
    }

    fn calculate(&self) -> FlightPerformance {
        let wind = wind_from_triangle(
            self.tas_kts,
            self.gs_kts,
            self.heading_deg,
            self.track_deg,
            &self.ias_history,
        );

        FlightPerformance {
            envelope: calculate_envelope(
                self.bank_deg,
                self.ias_kts,
                self.mach,
                self.vso_kts,
                self.vne_kts,
                self.mmo,
            ),
            energy: calculate_energy(self.tas_kts, self.altitude_ft, self.vs_fpm),
            glide: calculate_glide_reach(self.agl_ft, wind.headwind),
            wind,
        }
    }
}
