//! Trajectory model interface.

use bluebottle_elements::{ElementSchema, SchemaError};

use crate::EngineError;
use crate::step::StepContext;
use crate::variables::{RequiredVariable, X_SEA_WATER_VELOCITY, Y_SEA_WATER_VELOCITY};

/// A drift model: declares its element schema and forcing, and moves elements each step.
pub trait TrajectoryModel {
    fn name(&self) -> &str;

    /// Schema used to build the element table the model runs on.
    fn schema(&self) -> Result<ElementSchema, SchemaError>;

    fn required_variables(&self) -> &[RequiredVariable];

    fn update(&self, step: &mut StepContext<'_>) -> Result<(), EngineError>;
}

/// Passive tracers carried by the ocean current only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OceanDrift;

const OCEAN_DRIFT_VARIABLES: [RequiredVariable; 2] = [
    RequiredVariable::with_fallback(X_SEA_WATER_VELOCITY, 0.0),
    RequiredVariable::with_fallback(Y_SEA_WATER_VELOCITY, 0.0),
];

impl TrajectoryModel for OceanDrift {
    fn name(&self) -> &str {
        "OceanDrift"
    }

    fn schema(&self) -> Result<ElementSchema, SchemaError> {
        Ok(ElementSchema::passive_tracer())
    }

    fn required_variables(&self) -> &[RequiredVariable] {
        &OCEAN_DRIFT_VARIABLES
    }

    fn update(&self, step: &mut StepContext<'_>) -> Result<(), EngineError> {
        step.advect_ocean_current()
    }
}
