//! Conversion of scenario manifests into runnable simulations.

use chrono::NaiveDateTime;
use log::{info, warn};
use thiserror::Error;

use bluebottle_config::{
    AttributeValueConfig, CohortConfig, ConfigError, ScenarioConfig, VectorFieldConfig,
};
use bluebottle_elements::bluebottle::ORIENTATION;
use bluebottle_elements::schema::ORIGIN_MARKER;
use bluebottle_elements::{AttributeValue, SeedRequest, release_schedule};
use bluebottle_engine::variables::{X_SEA_WATER_VELOCITY, X_WIND, Y_SEA_WATER_VELOCITY, Y_WIND};
use bluebottle_engine::{
    ConstantReader, EngineError, ReaderStack, SeriesReader, Simulation, SimulationSettings,
    Trajectory,
};
use bluebottle_forcebalance::BluebottleDrift;

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid start time '{0}': expected YYYY-MM-DDTHH:MM:SS")]
    InvalidStartTime(String),
    #[error("scenario '{0}' not found")]
    NotFound(String),
    #[error("scenario catalog is empty")]
    EmptyCatalog,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One seeding call with a human-readable label.
#[derive(Debug, Clone)]
pub struct Cohort {
    pub label: String,
    pub seed: SeedRequest,
}

/// Runtime form of a [`ScenarioConfig`].
pub struct Scenario {
    pub name: String,
    pub settings: SimulationSettings,
    pub reader: ReaderStack,
    pub cohorts: Vec<Cohort>,
}

impl Scenario {
    pub fn labels(&self) -> Vec<String> {
        self.cohorts.iter().map(|c| c.label.clone()).collect()
    }

    /// Seed every cohort into a fresh bluebottle simulation.
    pub fn into_simulation(
        self,
    ) -> Result<(Simulation<BluebottleDrift, ReaderStack>, Vec<String>), ScenarioError> {
        let labels = self.labels();
        let mut simulation = Simulation::new(BluebottleDrift::new(), self.reader, self.settings)?;
        for cohort in &self.cohorts {
            let range = simulation.seed(&cohort.seed)?;
            info!("cohort '{}': {} elements", cohort.label, range.len());
        }
        Ok((simulation, labels))
    }

    /// Seed and run, returning the trajectory and cohort labels.
    pub fn run(self) -> Result<(Trajectory, Vec<String>), ScenarioError> {
        let (mut simulation, labels) = self.into_simulation()?;
        let trajectory = simulation.run()?;
        Ok((trajectory, labels))
    }
}

impl TryFrom<&ScenarioConfig> for Scenario {
    type Error = ScenarioError;

    fn try_from(config: &ScenarioConfig) -> Result<Self, Self::Error> {
        let start_time = parse_start_time(&config.start_time)?;
        let settings = SimulationSettings {
            start_time,
            time_step_s: config.time_step_s,
            duration_s: config.duration_s,
            output_step_s: config.output_step_s(),
        };
        settings.validate()?;

        let reader = build_reader(
            config.environment.wind.as_ref(),
            config.environment.current.as_ref(),
        );

        let cohorts = config
            .cohorts
            .iter()
            .enumerate()
            .map(|(index, cohort)| cohort_from_config(index, cohort))
            .collect();

        Ok(Scenario {
            name: config.name.clone(),
            settings,
            reader,
            cohorts,
        })
    }
}

/// Select a scenario by name (case-insensitive), defaulting to the first entry.
pub fn select<'a>(
    configs: &'a [ScenarioConfig],
    requested: Option<&str>,
) -> Result<&'a ScenarioConfig, ScenarioError> {
    if configs.is_empty() {
        return Err(ScenarioError::EmptyCatalog);
    }
    match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            configs
                .iter()
                .find(|cfg| cfg.name.to_uppercase() == upper)
                .ok_or_else(|| ScenarioError::NotFound(name.to_string()))
        }
        None => Ok(&configs[0]),
    }
}

fn parse_start_time(value: &str) -> Result<NaiveDateTime, ScenarioError> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
        .ok_or_else(|| ScenarioError::InvalidStartTime(value.to_string()))
}

fn build_reader(
    wind: Option<&VectorFieldConfig>,
    current: Option<&VectorFieldConfig>,
) -> ReaderStack {
    let mut constants = ConstantReader::new();
    let mut series = SeriesReader::new();
    for (field, x_name, y_name) in [
        (wind, X_WIND, Y_WIND),
        (current, X_SEA_WATER_VELOCITY, Y_SEA_WATER_VELOCITY),
    ] {
        match field {
            Some(VectorFieldConfig::Constant(field)) => {
                constants = constants.with(x_name, field.x).with(y_name, field.y);
            }
            Some(VectorFieldConfig::Series { series: points }) => {
                let xs = points.iter().map(|p| (p.offset_s, p.x)).collect();
                let ys = points.iter().map(|p| (p.offset_s, p.y)).collect();
                series = series.with_series(x_name, xs).with_series(y_name, ys);
            }
            // Engine fallbacks supply zero.
            None => {}
        }
    }
    ReaderStack::new().add_reader(series).add_reader(constants)
}

fn cohort_from_config(index: usize, config: &CohortConfig) -> Cohort {
    let label = config
        .name
        .clone()
        .unwrap_or_else(|| format!("cohort {}", index));

    let mut seed = SeedRequest::at(config.lon, config.lat, config.number)
        .with_release_times(release_schedule(config.number, 0.0, config.release_window_s))
        .with_attribute(ORIGIN_MARKER, index as f64);
    for (name, value) in &config.attributes {
        let value = match value {
            AttributeValueConfig::Scalar(v) => AttributeValue::Scalar(*v),
            AttributeValueConfig::PerElement(values) => AttributeValue::PerElement(values.clone()),
        };
        seed = seed.with_attribute(name, value);
    }

    if let Some(orientation) = seed.attributes.get(ORIENTATION) {
        let values: &[f64] = match orientation {
            AttributeValue::Scalar(v) => std::slice::from_ref(v),
            AttributeValue::PerElement(values) => values,
        };
        if values.iter().any(|o| o.abs() != 1.0) {
            warn!(
                "cohort '{}' has Orientation values other than +1/-1; handedness will be blended",
                label
            );
        }
    }

    Cohort { label, seed }
}
