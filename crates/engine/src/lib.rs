//! Trajectory engine hosting drift models.
//!
//! The engine owns the element table, samples environment readers at element positions, and
//! applies the position updates models request. Models only see a [`StepContext`] for the
//! duration of one timestep.

pub mod environment;
pub mod model;
pub mod reader;
pub mod simulation;
pub mod step;
pub mod variables;

pub use environment::Environment;
pub use model::{OceanDrift, TrajectoryModel};
pub use reader::{ConstantReader, EnvironmentReader, ReaderStack, SeriesReader};
pub use simulation::{
    RunStatistics, Simulation, SimulationSettings, Trajectory, TrajectoryFrame,
};
pub use step::StepContext;
pub use variables::RequiredVariable;

use thiserror::Error;

/// Errors surfaced by the engine and by models running inside it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("time step must be positive (got {0} s)")]
    NonPositiveTimeStep(f64),
    #[error("duration must be non-negative (got {0} s)")]
    NegativeDuration(f64),
    #[error("duration {duration_s} s is not a whole number of {step_s} s time steps")]
    UnalignedDuration { duration_s: f64, step_s: f64 },
    #[error("output step {output_s} s must be a positive multiple of the time step {step_s} s")]
    InvalidOutputStep { output_s: f64, step_s: f64 },
    #[error("environment variable '{0}' unavailable and has no fallback")]
    MissingVariable(String),
    #[error("velocity arrays hold {actual} values for {expected} elements")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("element table rejected input: {0}")]
    Seed(#[from] bluebottle_elements::SchemaError),
    #[error("model update failed: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),
}
