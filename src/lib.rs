//! # Flight Calc
//!
//! Flight parameter computation engine: wind resolution, turn performance,
//! vertical navigation, density altitude, envelope margins, specific energy
//! and glide reach.
//!
//! Every calculator is a pure function of its inputs. Angles are degrees,
//! speeds knots, altitudes feet and distances nautical miles unless a field
//! name says otherwise.

// Re-export the main types and functions
pub use angle::{normalize_angle, normalize_signed, AngleDeg};
pub use atmosphere::{calculate_density_altitude, DensityAltitudeData};
pub use cli_api::{
    Calculator, DensityAltitudeInputs, FiniteOutput, FlightInputs, FlightPerformance, GustData,
    GustInputs, TurnInputs, VnavInputs, WindInputs, WindTriangleInputs,
};
pub use envelope::{
    calculate_energy, calculate_envelope, calculate_glide_reach, EnergyData, EnergyTrend,
    EnvelopeMargins, GlideData,
};
pub use error::{FlightCalcError, Result};
pub use turn::{calculate_turn, TurnData};
pub use vnav::{calculate_vnav, VNAVData};
pub use wind::{gust_factor, resolve_wind, wind_from_triangle, WindComponents, WindVector};

// Module declarations
pub mod angle;
pub mod atmosphere;
pub mod cli_api;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod turn;
pub mod vnav;
pub mod wind;
