//! Per-timestep view handed to models.

use bluebottle_core::geo::offset_lonlat;
use bluebottle_elements::{ElementStatus, ElementTable};

use crate::EngineError;
use crate::environment::Environment;
use crate::variables::{X_SEA_WATER_VELOCITY, Y_SEA_WATER_VELOCITY};

/// Borrowed element table and environment for one timestep.
///
/// Attribute columns are read-only through this view; models may only move elements.
pub struct StepContext<'a> {
    elements: &'a mut ElementTable,
    environment: &'a Environment,
    time_step_s: f64,
}

impl<'a> StepContext<'a> {
    pub fn new(
        elements: &'a mut ElementTable,
        environment: &'a Environment,
        time_step_s: f64,
    ) -> Self {
        Self {
            elements,
            environment,
            time_step_s,
        }
    }

    pub fn elements(&self) -> &ElementTable {
        self.elements
    }

    pub fn environment(&self) -> &Environment {
        self.environment
    }

    pub fn time_step_s(&self) -> f64 {
        self.time_step_s
    }

    /// Environment column, failing when the model did not declare the variable.
    pub fn variable(&self, name: &str) -> Result<&'a [f64], EngineError> {
        let environment: &'a Environment = self.environment;
        environment
            .get(name)
            .ok_or_else(|| EngineError::MissingVariable(name.to_string()))
    }

    /// Move active elements with the sampled ocean current.
    pub fn advect_ocean_current(&mut self) -> Result<(), EngineError> {
        let u = self.variable(X_SEA_WATER_VELOCITY)?;
        let v = self.variable(Y_SEA_WATER_VELOCITY)?;
        self.update_positions(u, v)
    }

    /// Explicit Euler displacement of every active element by `(vx, vy)·dt`, velocities in m/s
    /// towards east and north.
    pub fn update_positions(&mut self, vx: &[f64], vy: &[f64]) -> Result<(), EngineError> {
        let expected = self.elements.len();
        for actual in [vx.len(), vy.len()] {
            if actual != expected {
                return Err(EngineError::LengthMismatch { expected, actual });
            }
        }

        let dt = self.time_step_s;
        let (lon, lat, status) = self.elements.positions_mut();
        for i in 0..expected {
            if status[i] != ElementStatus::Active {
                continue;
            }
            let (new_lon, new_lat) = offset_lonlat(lon[i], lat[i], vx[i] * dt, vy[i] * dt);
            lon[i] = new_lon;
            lat[i] = new_lat;
        }
        Ok(())
    }
}
