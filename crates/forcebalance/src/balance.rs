//! Column-wise evaluation of the sail/body force balance.
//!
//! Every derived quantity is computed for the whole population at once and nothing is cached
//! between calls. Degenerate geometry (zero chord, zero body area, ...) is not rejected; it
//! produces NaN or infinite values that the engine reports as non-finite positions.

use std::f64::consts::PI;

use bluebottle_core::constants::{RHO_AIR, RHO_WATER, SAIL_HEIGHT_TO_CHORD};

use crate::ForceBalanceError;
use crate::view::BluebottleView;

/// Wind components at each element position (m/s, east and north).
#[derive(Debug, Clone, Copy)]
pub struct WindSample<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
}

/// Drift velocity relative to the current (m/s, east and north).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DriftVelocity {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DriftVelocity {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn speed(&self, index: usize) -> f64 {
        self.x[index].hypot(self.y[index])
    }
}

/// Every intermediate column of one force-balance evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DriftDiagnostics {
    pub wind_speed: Vec<f64>,
    /// Direction the wind blows towards, counter-clockwise from east (radians).
    pub wind_angle: Vec<f64>,
    pub sail_height: Vec<f64>,
    /// Frontal sail area, circular segment (m²).
    pub s_y: Vec<f64>,
    /// Side sail area, triangle (m²).
    pub s_x: Vec<f64>,
    /// Submerged body area, rectangle (m²).
    pub s_h: Vec<f64>,
    /// Angle of attack with the handedness sign applied (degrees).
    pub beta_a_signed_deg: Vec<f64>,
    pub aspect_ratio: Vec<f64>,
    pub c_ay: Vec<f64>,
    pub lambda: Vec<f64>,
    pub beta: Vec<f64>,
    pub alpha: Vec<f64>,
    pub velocity: DriftVelocity,
}

/// Declared sail height, or `0.41 · chord` where the declared height is exactly zero.
pub fn effective_sail_height(heights: &[f64], chords: &[f64]) -> Vec<f64> {
    heights
        .iter()
        .zip(chords)
        .map(|(&h, &c)| if h == 0.0 { SAIL_HEIGHT_TO_CHORD * c } else { h })
        .collect()
}

/// Area of the sail seen face-on, modelled as a circular segment of height `h` and chord `c`.
pub fn sail_area(h: f64, chord: f64) -> f64 {
    let radius = h / 2.0 + chord * chord / (8.0 * h);
    let theta = 2.0 * (chord / (2.0 * radius)).asin();
    radius * radius * (theta - theta.sin()) / 2.0
}

/// Area of the sail seen edge-on, modelled as a triangle.
pub fn sail_side_area(h: f64, width: f64) -> f64 {
    h * width / 2.0
}

/// Area of the submerged body, modelled as a rectangle.
pub fn body_area(width: f64, height: f64) -> f64 {
    width * height
}

/// Aerodynamic coefficient perpendicular to the sail. Uses the unsigned angle of attack.
pub fn aerodynamic_coefficient(aspect_ratio: f64, beta_a_deg: f64, camber: f64) -> f64 {
    PI * aspect_ratio / 2.0 * beta_a_deg.to_radians() + 4.0 * PI * aspect_ratio / 3.0 * camber
}

/// Ratio of drift speed to wind speed from the aerodynamic and hydrodynamic force magnitudes.
pub fn shape_factor(s_y: f64, c_ay: f64, s_x: f64, c_ax: f64, s_h: f64, c_h: f64) -> f64 {
    let aero = ((s_y * c_ay).powi(2) + (s_x * c_ax).powi(2)).sqrt();
    (RHO_AIR * aero / (RHO_WATER * s_h * c_h)).sqrt()
}

/// Deflection of the aerodynamic force from the sail axis.
///
/// The force geometry only admits the obtuse solution, so the supplement of the arctangent is
/// taken.
pub fn heading_offset(s_y: f64, c_ay: f64, s_x: f64, c_ax: f64) -> f64 {
    (PI - (s_y * c_ay / (s_x * c_ax)).atan()).abs()
}

/// Resultant heading of the force balance; the drift points opposite to it.
pub fn resultant_heading(
    orientation: f64,
    beta: f64,
    beta_a_signed_deg: f64,
    wind_angle: f64,
) -> f64 {
    -orientation * beta - beta_a_signed_deg.to_radians() + wind_angle
}

/// Evaluate the force balance for every element and keep every intermediate column.
pub fn diagnose(
    view: &BluebottleView<'_>,
    wind: WindSample<'_>,
) -> Result<DriftDiagnostics, ForceBalanceError> {
    let n = view.len();
    for actual in [wind.x.len(), wind.y.len()] {
        if actual != n {
            return Err(ForceBalanceError::LengthMismatch { expected: n, actual });
        }
    }

    let wind_speed: Vec<f64> = wind
        .x
        .iter()
        .zip(wind.y)
        .map(|(x, y)| (x * x + y * y).sqrt())
        .collect();
    let wind_angle: Vec<f64> = wind.x.iter().zip(wind.y).map(|(x, y)| y.atan2(*x)).collect();

    let sail_height = effective_sail_height(view.sail_height, view.sail_chord);
    let s_y: Vec<f64> = sail_height
        .iter()
        .zip(view.sail_chord)
        .map(|(&h, &c)| sail_area(h, c))
        .collect();
    let s_x: Vec<f64> = sail_height
        .iter()
        .zip(view.sail_width)
        .map(|(&h, &w)| sail_side_area(h, w))
        .collect();
    let s_h: Vec<f64> = view
        .body_width
        .iter()
        .zip(view.body_height)
        .map(|(&w, &h)| body_area(w, h))
        .collect();

    let beta_a_signed_deg: Vec<f64> = view
        .beta_a_deg
        .iter()
        .zip(view.orientation)
        .map(|(b, o)| b * o)
        .collect();
    let aspect_ratio: Vec<f64> = sail_height
        .iter()
        .zip(&s_y)
        .map(|(h, s)| h * h / s)
        .collect();
    let c_ay: Vec<f64> = (0..n)
        .map(|i| aerodynamic_coefficient(aspect_ratio[i], view.beta_a_deg[i], view.camber[i]))
        .collect();

    let lambda: Vec<f64> = (0..n)
        .map(|i| shape_factor(s_y[i], c_ay[i], s_x[i], view.c_ax[i], s_h[i], view.c_h[i]))
        .collect();
    let beta: Vec<f64> = (0..n)
        .map(|i| heading_offset(s_y[i], c_ay[i], s_x[i], view.c_ax[i]))
        .collect();
    let alpha: Vec<f64> = (0..n)
        .map(|i| {
            resultant_heading(
                view.orientation[i],
                beta[i],
                beta_a_signed_deg[i],
                wind_angle[i],
            )
        })
        .collect();

    let velocity = DriftVelocity {
        x: (0..n)
            .map(|i| -lambda[i] * wind_speed[i] * alpha[i].cos())
            .collect(),
        y: (0..n)
            .map(|i| -lambda[i] * wind_speed[i] * alpha[i].sin())
            .collect(),
    };

    Ok(DriftDiagnostics {
        wind_speed,
        wind_angle,
        sail_height,
        s_y,
        s_x,
        s_h,
        beta_a_signed_deg,
        aspect_ratio,
        c_ay,
        lambda,
        beta,
        alpha,
        velocity,
    })
}

/// Drift velocity of every element relative to the ambient current.
pub fn drift_velocity(
    view: &BluebottleView<'_>,
    wind: WindSample<'_>,
) -> Result<DriftVelocity, ForceBalanceError> {
    diagnose(view, wind).map(|diagnostics| diagnostics.velocity)
}
