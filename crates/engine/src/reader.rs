//! Environment readers: sources of forcing values at a time and position.

use std::collections::BTreeMap;

/// Source of environment values. `None` means the reader has no data for the request.
pub trait EnvironmentReader {
    fn sample(&self, variable: &str, time_s: f64, lon: f64, lat: f64) -> Option<f64>;
}

impl<R: EnvironmentReader + ?Sized> EnvironmentReader for Box<R> {
    fn sample(&self, variable: &str, time_s: f64, lon: f64, lat: f64) -> Option<f64> {
        (**self).sample(variable, time_s, lon, lat)
    }
}

/// Spatially and temporally uniform values.
#[derive(Debug, Clone, Default)]
pub struct ConstantReader {
    values: BTreeMap<String, f64>,
}

impl ConstantReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: &str, value: f64) -> Self {
        self.values.insert(variable.to_string(), value);
        self
    }
}

impl EnvironmentReader for ConstantReader {
    fn sample(&self, variable: &str, _time_s: f64, _lon: f64, _lat: f64) -> Option<f64> {
        self.values.get(variable).copied()
    }
}

/// Spatially uniform values that vary in time, interpolated linearly between samples and held
/// constant outside the sampled interval.
#[derive(Debug, Clone, Default)]
pub struct SeriesReader {
    series: BTreeMap<String, Vec<(f64, f64)>>,
}

impl SeriesReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `(time_s, value)` samples for a variable. Samples are sorted by time.
    pub fn with_series(mut self, variable: &str, mut samples: Vec<(f64, f64)>) -> Self {
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.series.insert(variable.to_string(), samples);
        self
    }
}

impl EnvironmentReader for SeriesReader {
    fn sample(&self, variable: &str, time_s: f64, _lon: f64, _lat: f64) -> Option<f64> {
        let samples = self.series.get(variable)?;
        let first = samples.first()?;
        if time_s <= first.0 {
            return Some(first.1);
        }
        let upper = samples.partition_point(|(t, _)| *t <= time_s);
        if upper == samples.len() {
            return samples.last().map(|(_, v)| *v);
        }
        let (t0, v0) = samples[upper - 1];
        let (t1, v1) = samples[upper];
        let w = (time_s - t0) / (t1 - t0);
        Some(v0 + w * (v1 - v0))
    }
}

/// Ordered list of readers; the first reader with data answers.
#[derive(Default)]
pub struct ReaderStack {
    readers: Vec<Box<dyn EnvironmentReader>>,
}

impl ReaderStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reader<R: EnvironmentReader + 'static>(mut self, reader: R) -> Self {
        self.readers.push(Box::new(reader));
        self
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl EnvironmentReader for ReaderStack {
    fn sample(&self, variable: &str, time_s: f64, lon: f64, lat: f64) -> Option<f64> {
        self.readers
            .iter()
            .find_map(|reader| reader.sample(variable, time_s, lon, lat))
    }
}
