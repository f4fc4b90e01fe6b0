//! Bluebottle drift as a trajectory model.

use log::debug;

use bluebottle_elements::{ElementSchema, SchemaError};
use bluebottle_engine::variables::{X_SEA_WATER_VELOCITY, X_WIND, Y_SEA_WATER_VELOCITY, Y_WIND};
use bluebottle_engine::{EngineError, RequiredVariable, StepContext, TrajectoryModel};

use crate::balance::{WindSample, drift_velocity};
use crate::view::BluebottleView;

// Stokes drift (`STOKES_DRIFT_X`/`STOKES_DRIFT_Y`) is not part of the force balance and is not
// requested from readers.
const REQUIRED_VARIABLES: [RequiredVariable; 4] = [
    RequiredVariable::with_fallback(X_SEA_WATER_VELOCITY, 0.0),
    RequiredVariable::with_fallback(Y_SEA_WATER_VELOCITY, 0.0),
    RequiredVariable::with_fallback(X_WIND, 0.0),
    RequiredVariable::with_fallback(Y_WIND, 0.0),
];

/// Current advection plus sail-driven drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct BluebottleDrift;

impl BluebottleDrift {
    pub fn new() -> Self {
        Self
    }
}

impl TrajectoryModel for BluebottleDrift {
    fn name(&self) -> &str {
        "BluebottleDrift"
    }

    fn schema(&self) -> Result<ElementSchema, SchemaError> {
        ElementSchema::bluebottle()
    }

    fn required_variables(&self) -> &[RequiredVariable] {
        &REQUIRED_VARIABLES
    }

    fn update(&self, step: &mut StepContext<'_>) -> Result<(), EngineError> {
        step.advect_ocean_current()?;

        let drift = {
            let view = BluebottleView::from_table(step.elements())?;
            let wind = WindSample {
                x: step.variable(X_WIND)?,
                y: step.variable(Y_WIND)?,
            };
            drift_velocity(&view, wind)?
        };
        if !drift.is_empty() {
            let mean_speed =
                (0..drift.len()).map(|i| drift.speed(i)).sum::<f64>() / drift.len() as f64;
            debug!("mean drift speed {:.4} m/s", mean_speed);
        }

        step.update_positions(&drift.x, &drift.y)
    }
}
