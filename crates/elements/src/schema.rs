//! Attribute metadata and composable element schemas.

use thiserror::Error;

/// Metadata for one per-element attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub units: &'static str,
    pub description: &'static str,
    pub default: f64,
}

/// Errors raised while building schemas or seeding tables.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("attribute '{0}' is already declared in the schema")]
    DuplicateAttribute(String),
    #[error("attribute '{0}' is not declared in the schema")]
    UnknownAttribute(String),
    #[error("attribute '{name}' has {actual} values but {expected} elements are being seeded")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Ordered list of attributes that every element of a table carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementSchema {
    attributes: Vec<AttributeSpec>,
}

/// Cohort marker attribute shared by all element types.
pub const ORIGIN_MARKER: &str = "origin_marker";

impl ElementSchema {
    /// Schema of a passive tracer: elements carry only their cohort marker.
    pub fn passive_tracer() -> Self {
        Self {
            attributes: vec![AttributeSpec {
                name: ORIGIN_MARKER,
                units: "1",
                description: "Index of the seeding cohort the element belongs to",
                default: 0.0,
            }],
        }
    }

    /// Passive tracer schema extended with the bluebottle sail and body attributes.
    pub fn bluebottle() -> Result<Self, SchemaError> {
        Self::passive_tracer().extend(crate::BLUEBOTTLE_ATTRIBUTES)
    }

    /// Return a new schema with `extra` appended. Names must stay unique.
    pub fn extend<I>(&self, extra: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = AttributeSpec>,
    {
        let mut attributes = self.attributes.clone();
        for spec in extra {
            if attributes.iter().any(|a| a.name == spec.name) {
                return Err(SchemaError::DuplicateAttribute(spec.name.to_string()));
            }
            attributes.push(spec);
        }
        Ok(Self { attributes })
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.iter()
    }
}
