use log::trace;
use serde::Serialize;

use crate::angle::{normalize_angle, polar_to_vector, vector_bearing, AngleDeg};
use crate::constants::HALF_CIRCLE_DEG;

/// Wind resolved against the ground track from a reported wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindComponents {
    /// Along-track component, `-speed·cos(wind_from − track)` (kt)
    pub headwind: f64,
    /// Cross-track component, positive from the right (kt)
    pub crosswind: f64,
    /// Total wind speed (kt)
    pub total_wind: f64,
    /// Wind correction angle. Always zero: it needs TAS, which this method
    /// does not take.
    pub wca: f64,
    /// Drift angle, track − heading in `(-180, 180]` (deg)
    pub drift: f64,
}

/// Wind derived from the air and ground vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindVector {
    pub speed_kts: f64,
    /// Direction the wind blows from, `[0, 360)`
    pub direction_from: f64,
    pub headwind: f64,
    pub crosswind: f64,
    /// Peak minus mean of the recent IAS samples (kt)
    pub gust_factor: f64,
}

/// Split a speed along a relative bearing into (headwind, crosswind).
fn decompose(speed: f64, relative_deg: f64) -> (f64, f64) {
    let relative_rad = relative_deg.to_radians();
    (-speed * relative_rad.cos(), speed * relative_rad.sin())
}

/// Resolve a reported wind (direction FROM, speed) against track and heading.
///
/// # Arguments
/// * `track_deg` - Ground track
/// * `heading_deg` - Aircraft heading
/// * `wind_dir_deg` - Direction the wind blows from
/// * `wind_speed_kts` - Wind speed, non-negative
pub fn resolve_wind(
    track_deg: f64,
    heading_deg: f64,
    wind_dir_deg: f64,
    wind_speed_kts: f64,
) -> WindComponents {
    let track = AngleDeg::new(track_deg);
    let heading = AngleDeg::new(heading_deg);
    let wind_from = AngleDeg::new(wind_dir_deg);

    let drift = track.delta_from(heading);
    let wind_from_relative = wind_from.delta_from(track);
    let (headwind, crosswind) = decompose(wind_speed_kts, wind_from_relative);

    trace!(
        "wind: drift={drift:.3} relative={wind_from_relative:.3} head={headwind:.3} cross={crosswind:.3}"
    );

    WindComponents {
        headwind,
        crosswind,
        total_wind: wind_speed_kts,
        wca: 0.0,
        drift,
    }
}

/// Solve the wind triangle: wind = ground vector − air vector.
///
/// Headwind and crosswind apply the same decomposition as [`resolve_wind`]
/// to the bearing the wind blows towards, so a wind on the nose reads as a
/// positive headwind here. The gust factor is computed from `ias_history`.
pub fn wind_from_triangle(
    tas_kts: f64,
    gs_kts: f64,
    heading_deg: f64,
    track_deg: f64,
    ias_history: &[f64],
) -> WindVector {
    let air = polar_to_vector(heading_deg, tas_kts);
    let ground = polar_to_vector(track_deg, gs_kts);
    let wind = ground - air;

    let speed_kts = wind.norm();
    let direction_to = vector_bearing(&wind);
    let direction_from = normalize_angle(direction_to + HALF_CIRCLE_DEG);

    let relative = AngleDeg::new(direction_to).delta_from(AngleDeg::new(track_deg));
    let (headwind, crosswind) = decompose(speed_kts, relative);

    WindVector {
        speed_kts,
        direction_from,
        headwind,
        crosswind,
        gust_factor: gust_factor(ias_history),
    }
}

/// Gust factor: maximum minus mean of the IAS samples. Zero when empty.
pub fn gust_factor(ias_history: &[f64]) -> f64 {
    if ias_history.is_empty() {
        return 0.0;
    }

    let (max, sum) = ias_history
        .iter()
        .fold((f64::NEG_INFINITY, 0.0), |(max, sum), &ias| (max.max(ias), sum + ias));

    max - sum / ias_history.len() as f64
}
