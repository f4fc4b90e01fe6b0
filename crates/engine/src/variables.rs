//! Environment variable names and fallback declarations.

pub const X_SEA_WATER_VELOCITY: &str = "x_sea_water_velocity";
pub const Y_SEA_WATER_VELOCITY: &str = "y_sea_water_velocity";
pub const X_WIND: &str = "x_wind";
pub const Y_WIND: &str = "y_wind";
pub const STOKES_DRIFT_X: &str = "sea_surface_wave_stokes_drift_x_velocity";
pub const STOKES_DRIFT_Y: &str = "sea_surface_wave_stokes_drift_y_velocity";

/// Environment variable a model needs, with the value used when no reader provides it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredVariable {
    pub name: &'static str,
    pub fallback: Option<f64>,
}

impl RequiredVariable {
    pub const fn with_fallback(name: &'static str, fallback: f64) -> Self {
        Self {
            name,
            fallback: Some(fallback),
        }
    }

    pub const fn strict(name: &'static str) -> Self {
        Self {
            name,
            fallback: None,
        }
    }
}
