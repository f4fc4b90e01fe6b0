//! Per-step environment samples at element positions.

use std::collections::BTreeMap;

use crate::EngineError;
use crate::reader::EnvironmentReader;
use crate::variables::RequiredVariable;

/// Sampled environment columns, one value per element, for the current step.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    columns: BTreeMap<&'static str, Vec<f64>>,
}

impl Environment {
    /// Sample every required variable at each element position, substituting fallbacks where the
    /// reader has no data.
    pub fn sample<R: EnvironmentReader + ?Sized>(
        reader: &R,
        required: &[RequiredVariable],
        time_s: f64,
        lon: &[f64],
        lat: &[f64],
    ) -> Result<Self, EngineError> {
        let mut columns = BTreeMap::new();
        for variable in required {
            let column = lon
                .iter()
                .zip(lat)
                .map(|(&x, &y)| {
                    reader
                        .sample(variable.name, time_s, x, y)
                        .or(variable.fallback)
                        .ok_or_else(|| EngineError::MissingVariable(variable.name.to_string()))
                })
                .collect::<Result<Vec<f64>, _>>()?;
            columns.insert(variable.name, column);
        }
        Ok(Self { columns })
    }

    /// Build an environment directly from columns.
    pub fn from_columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Vec<f64>)>,
    {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}
