// Reference scenarios and whole-crate properties through the public API
use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use flight_calc::constants::{INFINITE_RADIUS_FT, INFINITE_RADIUS_NM, INFINITE_TIME};
use flight_calc::{
    calculate_density_altitude, calculate_envelope, calculate_turn, calculate_vnav,
    normalize_angle, resolve_wind, Calculator, FlightInputs,
};

#[test]
fn test_reference_wind() {
    let wind = resolve_wind(90.0, 85.0, 270.0, 15.0);
    assert_relative_eq!(wind.headwind, 15.0, epsilon = 1e-9);
    assert_relative_eq!(wind.crosswind, 0.0, epsilon = 1e-9);
    assert_relative_eq!(wind.drift, 5.0, epsilon = 1e-9);
}

#[test]
fn test_reference_turn() {
    let turn = calculate_turn(250.0, 25.0, 90.0);
    assert!(turn.radius_nm.is_finite() && turn.radius_nm > 0.0);
    assert!(turn.turn_rate_dps > 0.0);
    assert_relative_eq!(turn.load_factor, 1.103, epsilon = 1e-3);
}

#[test]
fn test_reference_density_altitude() {
    let da = calculate_density_altitude(5000.0, 25.0, 150.0, 170.0);
    assert!(da.density_altitude_ft > da.pressure_altitude_ft);
}

#[test]
fn test_wings_level_sentinels() {
    let turn = calculate_turn(180.0, 0.0, 45.0);
    assert_eq!(turn.radius_nm, INFINITE_RADIUS_NM);
    assert_eq!(turn.radius_ft, INFINITE_RADIUS_FT);
    assert_eq!(turn.time_to_turn_sec, INFINITE_TIME);
    assert_eq!(turn.turn_rate_dps, 0.0);
    assert!(turn.is_wings_level());
}

#[test]
fn test_no_limits_envelope() {
    let env = calculate_envelope(45.0, 200.0, 0.5, 0.0, 0.0, -0.1);
    assert_eq!(env.min_margin_pct, 100.0);
}

#[test]
fn test_normalize_angle_properties() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10_000 {
        let x: f64 = rng.gen_range(-1e7..1e7);
        let n = normalize_angle(x);
        assert!((0.0..360.0).contains(&n), "{x} normalized to {n}");
        assert_eq!(normalize_angle(n), n);
    }
}

#[test]
fn test_wind_on_the_nose_has_no_crosswind() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..1000 {
        let track: f64 = rng.gen_range(0.0..360.0);
        let heading: f64 = rng.gen_range(0.0..360.0);
        let speed: f64 = rng.gen_range(0.0..100.0);
        let wind = resolve_wind(track, heading, track, speed);
        assert!(wind.crosswind.abs() < 1e-9);
        assert_relative_eq!(wind.headwind.abs(), speed, epsilon = 1e-9);
    }
}

#[test]
fn test_vnav_descent_flag_follows_altitudes() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1000 {
        let current: f64 = rng.gen_range(0.0..45000.0);
        let target: f64 = rng.gen_range(0.0..45000.0);
        let vnav = calculate_vnav(current, target, rng.gen_range(0.0..200.0), 250.0, -1000.0);
        assert_eq!(vnav.is_descent, target < current);
    }
}

#[test]
fn test_valid_flight_inputs_always_finite() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..500 {
        let args: Vec<String> = [
            rng.gen_range(0.0..500.0),
            rng.gen_range(0.0..500.0),
            rng.gen_range(-720.0..720.0),
            rng.gen_range(-720.0..720.0),
            rng.gen_range(0.0..400.0),
            rng.gen_range(0.0..0.95),
            rng.gen_range(-1000.0..45000.0),
            rng.gen_range(0.0..40000.0),
            rng.gen_range(-6000.0..6000.0),
            rng.gen_range(500.0..80000.0),
            rng.gen_range(0.0..89.9),
            rng.gen_range(-10.0..150.0),
            rng.gen_range(-10.0..400.0),
            rng.gen_range(-0.1..0.95),
        ]
        .iter()
        .map(|v: &f64| v.to_string())
        .collect();

        let perf = FlightInputs::from_args(&args).unwrap().evaluate().unwrap();
        let json = serde_json::to_value(perf).unwrap();
        for section in ["wind", "envelope", "energy", "glide"] {
            for (key, value) in json[section].as_object().unwrap() {
                assert!(value.is_number(), "{section}.{key} is {value}");
            }
        }
        assert!(perf.glide.max_range_with_wind_nm >= 0.0);
    }
}
