//! Fixed-step run loop.

use std::ops::Range;

use chrono::{NaiveDateTime, TimeDelta};
use log::{debug, info, warn};

use bluebottle_elements::{ElementStatus, ElementTable, SeedRequest};

use crate::EngineError;
use crate::environment::Environment;
use crate::model::TrajectoryModel;
use crate::reader::EnvironmentReader;
use crate::step::StepContext;

/// Timing of a run. The time step is used verbatim.
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub start_time: NaiveDateTime,
    pub time_step_s: f64,
    pub duration_s: f64,
    pub output_step_s: f64,
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.time_step_s > 0.0) {
            return Err(EngineError::NonPositiveTimeStep(self.time_step_s));
        }
        if !(self.duration_s >= 0.0) {
            return Err(EngineError::NegativeDuration(self.duration_s));
        }
        let steps = self.duration_s / self.time_step_s;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(EngineError::UnalignedDuration {
                duration_s: self.duration_s,
                step_s: self.time_step_s,
            });
        }
        let ratio = self.output_step_s / self.time_step_s;
        if !(ratio >= 1.0) || (ratio - ratio.round()).abs() > 1e-9 {
            return Err(EngineError::InvalidOutputStep {
                output_s: self.output_step_s,
                step_s: self.time_step_s,
            });
        }
        Ok(())
    }

    pub fn step_count(&self) -> usize {
        (self.duration_s / self.time_step_s).round() as usize
    }

    fn steps_per_output(&self) -> usize {
        ((self.output_step_s / self.time_step_s).round() as usize).max(1)
    }

    /// Wall-clock time `offset_s` seconds after the start.
    pub fn time_at(&self, offset_s: f64) -> NaiveDateTime {
        self.start_time + TimeDelta::milliseconds((offset_s * 1_000.0).round() as i64)
    }
}

/// Element positions at one output time.
#[derive(Debug, Clone)]
pub struct TrajectoryFrame {
    pub time_s: f64,
    pub time: NaiveDateTime,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub status: Vec<ElementStatus>,
}

/// Counters collected over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub steps: usize,
    pub elements: usize,
    pub non_finite_positions: usize,
}

/// Output of [`Simulation::run`].
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub model: String,
    pub element_ids: Vec<u64>,
    pub origin_marker: Vec<f64>,
    pub frames: Vec<TrajectoryFrame>,
    pub statistics: RunStatistics,
}

impl Trajectory {
    pub fn first_frame(&self) -> Option<&TrajectoryFrame> {
        self.frames.first()
    }

    pub fn last_frame(&self) -> Option<&TrajectoryFrame> {
        self.frames.last()
    }
}

/// A model, its forcing, and the element population it moves.
pub struct Simulation<M, R> {
    model: M,
    reader: R,
    settings: SimulationSettings,
    elements: ElementTable,
}

impl<M: TrajectoryModel, R: EnvironmentReader> Simulation<M, R> {
    pub fn new(model: M, reader: R, settings: SimulationSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        let elements = ElementTable::new(model.schema()?);
        Ok(Self {
            model,
            reader,
            settings,
            elements,
        })
    }

    pub fn seed(&mut self, request: &SeedRequest) -> Result<Range<usize>, EngineError> {
        let range = self.elements.seed(request)?;
        debug!(
            "seeded {} elements at ({:.4}, {:.4})",
            range.len(),
            request.lon,
            request.lat
        );
        Ok(range)
    }

    pub fn elements(&self) -> &ElementTable {
        &self.elements
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Integrate from the start time over the configured duration.
    ///
    /// Elements released at time `t` first move during the step starting at `t`. A frame is
    /// recorded at the start and after every output step.
    pub fn run(&mut self) -> Result<Trajectory, EngineError> {
        let steps = self.settings.step_count();
        let dt = self.settings.time_step_s;
        let per_output = self.settings.steps_per_output();
        info!(
            "running {} with {} elements for {} steps of {} s",
            self.model.name(),
            self.elements.len(),
            steps,
            dt
        );

        self.elements.release_due(0.0);
        let mut frames = vec![self.frame(0.0)];
        let mut non_finite = 0;

        for step in 1..=steps {
            let t_start = (step - 1) as f64 * dt;
            self.elements.release_due(t_start);

            let environment = Environment::sample(
                &self.reader,
                self.model.required_variables(),
                t_start,
                self.elements.lon(),
                self.elements.lat(),
            )?;
            let mut context = StepContext::new(&mut self.elements, &environment, dt);
            self.model.update(&mut context)?;
            self.elements.age_active(dt);

            let count = self.count_non_finite();
            if count > non_finite {
                warn!(
                    "{} elements have non-finite positions after step {} (check sail and body geometry)",
                    count, step
                );
            }
            non_finite = count;
            debug!(
                "step {}/{}: {} active elements",
                step,
                steps,
                self.elements.active_count()
            );

            if step % per_output == 0 || step == steps {
                frames.push(self.frame(step as f64 * dt));
            }
        }

        let statistics = RunStatistics {
            steps,
            elements: self.elements.len(),
            non_finite_positions: non_finite,
        };
        info!(
            "{} finished: {} frames, {} non-finite positions",
            self.model.name(),
            frames.len(),
            non_finite
        );

        Ok(Trajectory {
            model: self.model.name().to_string(),
            element_ids: self.elements.ids().to_vec(),
            origin_marker: self
                .elements
                .column(bluebottle_elements::schema::ORIGIN_MARKER)
                .map(<[f64]>::to_vec)
                .unwrap_or_else(|| vec![0.0; self.elements.len()]),
            frames,
            statistics,
        })
    }

    fn frame(&self, time_s: f64) -> TrajectoryFrame {
        TrajectoryFrame {
            time_s,
            time: self.settings.time_at(time_s),
            lon: self.elements.lon().to_vec(),
            lat: self.elements.lat().to_vec(),
            status: self.elements.status().to_vec(),
        }
    }

    fn count_non_finite(&self) -> usize {
        self.elements
            .lon()
            .iter()
            .zip(self.elements.lat())
            .filter(|(lon, lat)| !lon.is_finite() || !lat.is_finite())
            .count()
    }
}
