//! Configuration models and loaders for bluebottle drift scenarios.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One drift run: timing, forcing, and the cohorts to seed.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    /// Start of the run, `YYYY-MM-DDTHH:MM:SS`.
    pub start_time: String,
    pub time_step_s: f64,
    pub duration_s: f64,
    /// Output interval; defaults to the time step.
    #[serde(default)]
    pub output_step_s: Option<f64>,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub cohorts: Vec<CohortConfig>,
}

impl ScenarioConfig {
    pub fn output_step_s(&self) -> f64 {
        self.output_step_s.unwrap_or(self.time_step_s)
    }
}

/// Spatially uniform forcing. Absent fields are treated as zero.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub wind: Option<VectorFieldConfig>,
    #[serde(default)]
    pub current: Option<VectorFieldConfig>,
}

/// Velocity field in m/s, either constant or a time series.
///
/// Both shapes reject unknown keys, so a misspelt component or a malformed series entry fails to
/// parse instead of falling back to a zero constant.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum VectorFieldConfig {
    Series { series: Vec<SeriesPointConfig> },
    Constant(ConstantFieldConfig),
}

/// Constant velocity components; absent components are zero.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConstantFieldConfig {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Sample of a time-varying field, `offset_s` seconds after the start.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeriesPointConfig {
    pub offset_s: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Group of elements seeded together at one position.
#[derive(Debug, Deserialize, Clone)]
pub struct CohortConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub lon: f64,
    pub lat: f64,
    pub number: usize,
    /// Releases are spread linearly over this window, starting at the run start.
    #[serde(default)]
    pub release_window_s: f64,
    /// Attribute overrides by name, scalar or one value per element.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValueConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AttributeValueConfig {
    Scalar(f64),
    PerElement(Vec<f64>),
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load scenarios from a TOML file, a YAML file holding a list, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
