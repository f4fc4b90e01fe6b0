use std::f64::consts::PI;

use chrono::NaiveDate;

use bluebottle_drift::elements::bluebottle::{
    CURRENT_DRIFT_FACTOR, ORIENTATION, SAIL_CHORD, SAIL_HEIGHT, SAIL_WIDTH,
};
use bluebottle_drift::elements::{ElementSchema, ElementTable, SeedRequest};
use bluebottle_drift::engine::variables::{X_SEA_WATER_VELOCITY, X_WIND, Y_SEA_WATER_VELOCITY};
use bluebottle_drift::engine::{ConstantReader, Simulation, SimulationSettings};
use bluebottle_drift::forcebalance::{
    BluebottleDrift, BluebottleView, ForceBalanceError, WindSample, diagnose, drift_velocity,
    effective_sail_height,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0e-12)
}

fn table_with(requests: &[SeedRequest]) -> ElementTable {
    let mut table = ElementTable::new(ElementSchema::bluebottle().expect("bluebottle schema"));
    for request in requests {
        table.seed(request).expect("seed");
    }
    table
}

fn uniform_wind(n: usize, x: f64, y: f64) -> (Vec<f64>, Vec<f64>) {
    (vec![x; n], vec![y; n])
}

#[test]
fn default_bluebottle_in_easterly_wind_matches_analytic_solution() {
    let table = table_with(&[SeedRequest::at(4.4, 59.9, 1)]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(1, 5.0, 0.0);
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");

    assert!(close(d.sail_height[0], 0.01394, 1e-12));
    assert!(close(d.s_y[0], 3.550916072287494e-4, 1e-9));
    assert!(close(d.s_x[0], 1.1152e-4, 1e-12));
    assert!(close(d.s_h[0], 3.78e-4, 1e-12));
    assert!(close(d.aspect_ratio[0], 0.5472492056812176, 1e-9));
    assert!(close(d.c_ay[0], 0.623049028777124, 1e-9));
    assert!(close(d.lambda[0], 0.02646470439815596, 1e-9));
    assert!(close(d.beta[0], 1.621160615795988, 1e-9));
    assert!(close(d.alpha[0], -2.3192923165937196, 1e-9));
    assert!(close(d.velocity.x[0], 0.09005112175343755, 1e-9));
    assert!(close(d.velocity.y[0], 0.09695519554408603, 1e-9));

    // Deflected from due downwind (east) towards the north for a right-handed animal.
    let heading = d.velocity.y[0].atan2(d.velocity.x[0]).to_degrees();
    assert!(heading > 40.0 && heading < 50.0, "heading {heading}");
}

#[test]
fn heading_offset_takes_the_obtuse_solution() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 3)
        .with_attribute(SAIL_HEIGHT, vec![0.0, 0.01, 0.03])
        .with_attribute(SAIL_WIDTH, vec![0.016, 0.005, 0.05])]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(3, 3.0, 4.0);
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");
    for beta in d.beta {
        assert!(beta > PI / 2.0 && beta <= PI, "beta {beta}");
    }
}

#[test]
fn zero_wind_gives_exactly_zero_drift() {
    let table = table_with(&[
        SeedRequest::at(0.0, 0.0, 2),
        SeedRequest::at(0.0, 0.0, 2)
            .with_attribute(SAIL_HEIGHT, 0.03)
            .with_attribute(ORIENTATION, -1.0),
    ]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(4, 0.0, 0.0);
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");
    for i in 0..4 {
        assert!(d.lambda[i].is_finite() && d.lambda[i] > 0.0);
        assert_eq!(d.velocity.x[i], 0.0);
        assert_eq!(d.velocity.y[i], 0.0);
    }
}

#[test]
fn opposite_handedness_mirrors_drift_about_the_wind_axis() {
    let table = table_with(&[
        SeedRequest::at(0.0, 0.0, 1),
        SeedRequest::at(0.0, 0.0, 1).with_attribute(ORIENTATION, -1.0),
    ]);
    let view = BluebottleView::from_table(&table).expect("view");
    let wind_angle = 30.0_f64.to_radians();
    let (wx, wy) = uniform_wind(2, 6.0 * wind_angle.cos(), 6.0 * wind_angle.sin());
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");

    assert_eq!(d.lambda[0], d.lambda[1]);
    assert_eq!(d.beta[0], d.beta[1]);
    assert!(close(d.alpha[0] + d.alpha[1], 2.0 * wind_angle, 1e-12));

    // Reflect the right-handed drift about the wind direction.
    let (vx, vy) = (d.velocity.x[0], d.velocity.y[0]);
    let (c, s) = ((2.0 * wind_angle).cos(), (2.0 * wind_angle).sin());
    let mirrored = (c * vx + s * vy, s * vx - c * vy);
    assert!((mirrored.0 - d.velocity.x[1]).abs() < 1e-12);
    assert!((mirrored.1 - d.velocity.y[1]).abs() < 1e-12);
}

#[test]
fn mirrored_easterly_scenario_flips_northward_component() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 1).with_attribute(ORIENTATION, -1.0)]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(1, 5.0, 0.0);
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");
    assert!(close(d.lambda[0], 0.02646470439815596, 1e-9));
    assert!(close(d.alpha[0], 2.3192923165937196, 1e-9));
    assert!(close(d.velocity.x[0], 0.09005112175343755, 1e-9));
    assert!(close(d.velocity.y[0], -0.09695519554408603, 1e-9));
}

#[test]
fn sail_height_is_derived_only_when_zero() {
    let heights = [0.0, 0.02, 0.0, 0.005];
    let chords = [0.034, 0.034, 0.05, 0.5];
    let effective = effective_sail_height(&heights, &chords);
    assert!(close(effective[0], 0.41 * 0.034, 1e-15));
    assert_eq!(effective[1], 0.02);
    assert!(close(effective[2], 0.41 * 0.05, 1e-15));
    assert_eq!(effective[3], 0.005);
}

#[test]
fn doubling_wind_doubles_drift_and_keeps_heading() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 2)
        .with_attribute(ORIENTATION, vec![1.0, -1.0])
        .with_attribute(SAIL_CHORD, vec![0.034, 0.05])]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(2, 3.0, -2.0);
    let (wx2, wy2) = uniform_wind(2, 6.0, -4.0);
    let one = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");
    let two = diagnose(&view, WindSample { x: &wx2, y: &wy2 }).expect("diagnose");
    for i in 0..2 {
        assert_eq!(one.lambda[i], two.lambda[i]);
        assert!(close(two.velocity.x[i], 2.0 * one.velocity.x[i], 1e-12));
        assert!(close(two.velocity.y[i], 2.0 * one.velocity.y[i], 1e-12));
    }
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 5).with_attribute(
        SAIL_HEIGHT,
        vec![0.0, 0.012, 0.015, 0.021, 0.0],
    )]);
    let view = BluebottleView::from_table(&table).expect("view");
    let wx = vec![1.0, -3.0, 7.5, 0.2, 4.0];
    let wy = vec![2.0, 0.5, -1.0, 9.0, -4.0];
    let first = drift_velocity(&view, WindSample { x: &wx, y: &wy }).expect("drift");
    let second = drift_velocity(&view, WindSample { x: &wx, y: &wy }).expect("drift");
    for i in 0..5 {
        assert_eq!(first.x[i].to_bits(), second.x[i].to_bits());
        assert_eq!(first.y[i].to_bits(), second.y[i].to_bits());
    }
}

#[test]
fn larger_sail_cohort_drifts_faster() {
    let table = table_with(&[
        SeedRequest::at(4.4, 59.9, 25),
        SeedRequest::at(4.4, 59.9, 25)
            .with_attribute(SAIL_HEIGHT, vec![0.021; 25])
            .with_attribute(SAIL_WIDTH, vec![0.024; 25]),
    ]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(50, 5.0, 0.0);
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");

    let speed = |i: usize| d.velocity.speed(i);
    let fastest_default = (0..25).map(speed).fold(f64::MIN, f64::max);
    let slowest_enlarged = (25..50).map(speed).fold(f64::MAX, f64::min);
    assert!(slowest_enlarged > fastest_default);
    assert!(close(d.lambda[25], 0.039867703051429074, 1e-9));
}

#[test]
fn degenerate_body_propagates_non_finite_values() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 1).with_attribute("Body_height", 0.0)]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(1, 5.0, 0.0);
    let drift = drift_velocity(&view, WindSample { x: &wx, y: &wy }).expect("no error");
    assert!(!drift.x[0].is_finite() || !drift.y[0].is_finite());
}

#[test]
fn zero_chord_propagates_nan_without_error() {
    // Derived height collapses to zero, and a declared height over a zero chord gives a zero area.
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 2)
        .with_attribute(SAIL_CHORD, 0.0)
        .with_attribute(SAIL_HEIGHT, vec![0.0, 0.01])]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(2, 5.0, 0.0);
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("no error");
    for i in 0..2 {
        assert!(d.velocity.x[i].is_nan(), "vx {}", d.velocity.x[i]);
        assert!(d.velocity.y[i].is_nan(), "vy {}", d.velocity.y[i]);
    }
    assert!(d.s_y[0].is_nan());
    assert_eq!(d.s_y[1], 0.0);
}

#[test]
fn vanishing_sail_height_overflows_to_nan_without_error() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 1).with_attribute(SAIL_HEIGHT, 1.0e-300)]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(1, 5.0, 0.0);
    let drift = drift_velocity(&view, WindSample { x: &wx, y: &wy }).expect("no error");
    assert!(drift.x[0].is_nan() && drift.y[0].is_nan());
}

#[test]
fn negative_sail_height_is_not_rejected() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 1).with_attribute(SAIL_HEIGHT, -0.01)]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(1, 5.0, 0.0);
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("no error");
    assert!(d.s_y[0] < 0.0);
    assert!(d.velocity.x[0].is_finite() && d.velocity.y[0].is_finite());
}

#[test]
fn fractional_orientation_acts_as_a_plain_multiplier() {
    let table =
        table_with(&[SeedRequest::at(0.0, 0.0, 2).with_attribute(ORIENTATION, vec![0.5, 0.0])]);
    let view = BluebottleView::from_table(&table).expect("view");
    let wind_angle = 20.0_f64.to_radians();
    let (wx, wy) = uniform_wind(2, 5.0 * wind_angle.cos(), 5.0 * wind_angle.sin());
    let d = diagnose(&view, WindSample { x: &wx, y: &wy }).expect("diagnose");

    // Handedness only enters alpha; C_Ay, Lambda and beta use the unsigned angle of attack.
    assert!(close(d.lambda[0], 0.02646470439815596, 1e-9));
    assert_eq!(d.beta[0], d.beta[1]);
    assert_eq!(d.beta_a_signed_deg, vec![20.0, 0.0]);

    let expected = -0.5 * d.beta[0] - 20.0_f64.to_radians() + wind_angle;
    assert!(close(d.alpha[0], expected, 1e-12));
    assert!(close(d.alpha[1], wind_angle, 1e-12));
    for i in 0..2 {
        assert!(d.velocity.x[i].is_finite() && d.velocity.y[i].is_finite());
        assert!(close(d.velocity.speed(i), d.lambda[i] * 5.0, 1e-12));
    }
    // Without handedness the drift points straight into the wind.
    assert!(close(d.velocity.x[1], -d.lambda[1] * 5.0 * wind_angle.cos(), 1e-12));
}

#[test]
fn current_drift_factor_does_not_change_drift_or_positions() {
    let seed = |factor: f64| {
        SeedRequest::at(4.4, 59.9, 2)
            .with_attribute(CURRENT_DRIFT_FACTOR, factor)
            .with_attribute(ORIENTATION, vec![1.0, -1.0])
    };

    let table = table_with(&[seed(1.0), seed(0.0), seed(2.5)]);
    let view = BluebottleView::from_table(&table).expect("view");
    let (wx, wy) = uniform_wind(6, 6.0, -1.5);
    let drift = drift_velocity(&view, WindSample { x: &wx, y: &wy }).expect("drift");
    for i in 2..6 {
        assert_eq!(drift.x[i].to_bits(), drift.x[i % 2].to_bits());
        assert_eq!(drift.y[i].to_bits(), drift.y[i % 2].to_bits());
    }

    let settings = SimulationSettings {
        start_time: NaiveDate::from_ymd_opt(2015, 11, 16)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date"),
        time_step_s: 900.0,
        duration_s: 7200.0,
        output_step_s: 3600.0,
    };
    let final_positions = |factor: f64| {
        let reader = ConstantReader::new()
            .with(X_WIND, 6.0)
            .with(X_SEA_WATER_VELOCITY, 0.2)
            .with(Y_SEA_WATER_VELOCITY, -0.1);
        let mut sim =
            Simulation::new(BluebottleDrift::new(), reader, settings.clone()).expect("simulation");
        sim.seed(&seed(factor)).expect("seed");
        let trajectory = sim.run().expect("run");
        let last = trajectory.last_frame().expect("frame").clone();
        (last.lon, last.lat)
    };
    let (lon_ref, lat_ref) = final_positions(1.0);
    for factor in [0.0, 2.5] {
        let (lon, lat) = final_positions(factor);
        for i in 0..2 {
            assert_eq!(lon[i].to_bits(), lon_ref[i].to_bits());
            assert_eq!(lat[i].to_bits(), lat_ref[i].to_bits());
        }
    }
}

#[test]
fn mismatched_wind_length_is_rejected() {
    let table = table_with(&[SeedRequest::at(0.0, 0.0, 3)]);
    let view = BluebottleView::from_table(&table).expect("view");
    let err = drift_velocity(
        &view,
        WindSample {
            x: &[1.0, 2.0],
            y: &[0.0, 0.0, 0.0],
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ForceBalanceError::LengthMismatch {
            expected: 3,
            actual: 2
        }
    );
}

#[test]
fn passive_tracer_table_has_no_sail_attributes() {
    let table = ElementTable::new(ElementSchema::passive_tracer());
    let err = BluebottleView::from_table(&table).unwrap_err();
    assert_eq!(err, ForceBalanceError::MissingAttribute(SAIL_HEIGHT));
}
