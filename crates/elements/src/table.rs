//! Structure-of-arrays population table.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::schema::{ElementSchema, SchemaError};

/// Lifecycle state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementStatus {
    /// Seeded with a release time that has not been reached yet.
    Scheduled,
    /// Released and moving with the flow.
    Active,
}

impl ElementStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ElementStatus::Scheduled => "scheduled",
            ElementStatus::Active => "active",
        }
    }
}

/// Value supplied for an attribute when seeding.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Broadcast to every element of the seeding call.
    Scalar(f64),
    /// One value per seeded element.
    PerElement(Vec<f64>),
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Scalar(value)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(values: Vec<f64>) -> Self {
        AttributeValue::PerElement(values)
    }
}

/// One seeding call: `release_times_s.len()` elements at a single position.
#[derive(Debug, Clone, Default)]
pub struct SeedRequest {
    pub lon: f64,
    pub lat: f64,
    /// Release time of each element, in seconds after the simulation start.
    pub release_times_s: Vec<f64>,
    /// Attribute overrides; anything absent takes its schema default.
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl SeedRequest {
    /// `number` elements released at the simulation start.
    pub fn at(lon: f64, lat: f64, number: usize) -> Self {
        Self {
            lon,
            lat,
            release_times_s: vec![0.0; number],
            attributes: BTreeMap::new(),
        }
    }

    pub fn number(&self) -> usize {
        self.release_times_s.len()
    }

    pub fn with_release_times(mut self, release_times_s: Vec<f64>) -> Self {
        self.release_times_s = release_times_s;
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }
}

/// Release times spread linearly from `start_s` over `window_s` for `number` elements.
pub fn release_schedule(number: usize, start_s: f64, window_s: f64) -> Vec<f64> {
    match number {
        0 => Vec::new(),
        1 => vec![start_s],
        n => {
            let step = window_s / (n - 1) as f64;
            (0..n).map(|i| start_s + step * i as f64).collect()
        }
    }
}

/// Population table: engine-owned state plus one column per schema attribute.
#[derive(Debug, Clone)]
pub struct ElementTable {
    schema: ElementSchema,
    id: Vec<u64>,
    lon: Vec<f64>,
    lat: Vec<f64>,
    release_time_s: Vec<f64>,
    status: Vec<ElementStatus>,
    age_s: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl ElementTable {
    pub fn new(schema: ElementSchema) -> Self {
        let columns = vec![Vec::new(); schema.len()];
        Self {
            schema,
            id: Vec::new(),
            lon: Vec::new(),
            lat: Vec::new(),
            release_time_s: Vec::new(),
            status: Vec::new(),
            age_s: Vec::new(),
            columns,
        }
    }

    pub fn schema(&self) -> &ElementSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Append the elements described by `request`, returning their index range.
    ///
    /// The table is left untouched when the request is rejected.
    pub fn seed(&mut self, request: &SeedRequest) -> Result<Range<usize>, SchemaError> {
        let number = request.number();
        for (name, value) in &request.attributes {
            if self.schema.index_of(name).is_none() {
                return Err(SchemaError::UnknownAttribute(name.clone()));
            }
            if let AttributeValue::PerElement(values) = value {
                if values.len() != number {
                    return Err(SchemaError::LengthMismatch {
                        name: name.clone(),
                        expected: number,
                        actual: values.len(),
                    });
                }
            }
        }

        let start = self.len();
        let first_id = self.id.last().map(|id| id + 1).unwrap_or(0);
        self.id.extend((0..number as u64).map(|i| first_id + i));
        self.lon.extend(std::iter::repeat_n(request.lon, number));
        self.lat.extend(std::iter::repeat_n(request.lat, number));
        self.release_time_s.extend_from_slice(&request.release_times_s);
        self.status
            .extend(std::iter::repeat_n(ElementStatus::Scheduled, number));
        self.age_s.extend(std::iter::repeat_n(0.0, number));

        for (spec, column) in self.schema.iter().zip(self.columns.iter_mut()) {
            match request.attributes.get(spec.name) {
                Some(AttributeValue::PerElement(values)) => column.extend_from_slice(values),
                Some(AttributeValue::Scalar(value)) => {
                    column.extend(std::iter::repeat_n(*value, number))
                }
                None => column.extend(std::iter::repeat_n(spec.default, number)),
            }
        }

        Ok(start..start + number)
    }

    /// Attribute column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.schema
            .index_of(name)
            .map(|idx| self.columns[idx].as_slice())
    }

    pub fn ids(&self) -> &[u64] {
        &self.id
    }

    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    pub fn release_times_s(&self) -> &[f64] {
        &self.release_time_s
    }

    pub fn status(&self) -> &[ElementStatus] {
        &self.status
    }

    pub fn ages_s(&self) -> &[f64] {
        &self.age_s
    }

    /// Mutable positions together with the read-only status column.
    pub fn positions_mut(&mut self) -> (&mut [f64], &mut [f64], &[ElementStatus]) {
        (&mut self.lon, &mut self.lat, &self.status)
    }

    /// Activate scheduled elements whose release time is at or before `time_s`.
    /// Returns how many were released.
    pub fn release_due(&mut self, time_s: f64) -> usize {
        let mut released = 0;
        for (status, release) in self.status.iter_mut().zip(&self.release_time_s) {
            if *status == ElementStatus::Scheduled && *release <= time_s {
                *status = ElementStatus::Active;
                released += 1;
            }
        }
        released
    }

    /// Advance the age of every active element by `dt_s`.
    pub fn age_active(&mut self, dt_s: f64) {
        for (age, status) in self.age_s.iter_mut().zip(&self.status) {
            if *status == ElementStatus::Active {
                *age += dt_s;
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.status
            .iter()
            .filter(|s| **s == ElementStatus::Active)
            .count()
    }
}
