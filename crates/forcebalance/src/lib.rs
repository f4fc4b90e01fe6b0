//! Wind-driven drift of bluebottles from a sail/body force balance.
//!
//! The sail catches wind above the surface and the submerged body resists motion through the
//! water. Balancing the two gives a drift speed proportional to wind speed (the shape factor
//! `Lambda`) and a heading deflected from downwind by an amount set by the sail geometry and the
//! handedness of the animal. The drift velocity is applied on top of advection by the current.

pub mod balance;
pub mod model;
pub mod view;

pub use balance::{
    DriftDiagnostics, DriftVelocity, WindSample, diagnose, drift_velocity, effective_sail_height,
};
pub use model::BluebottleDrift;
pub use view::BluebottleView;

use bluebottle_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ForceBalanceError {
    #[error("element table has no '{0}' attribute; build it from the bluebottle schema")]
    MissingAttribute(&'static str),
    #[error("wind samples hold {actual} values for {expected} elements")]
    LengthMismatch { expected: usize, actual: usize },
}

impl From<ForceBalanceError> for EngineError {
    fn from(err: ForceBalanceError) -> Self {
        EngineError::Model(Box::new(err))
    }
}
