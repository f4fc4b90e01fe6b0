//! Particle element schemas and the population table that stores them.
//!
//! A schema is a plain value: the bluebottle schema is obtained by extending the passive tracer
//! schema, never by mutating a shared base type. Tables are created from a schema and own one
//! column per attribute.

pub mod bluebottle;
pub mod schema;
pub mod table;

pub use bluebottle::BLUEBOTTLE_ATTRIBUTES;
pub use schema::{AttributeSpec, ElementSchema, SchemaError};
pub use table::{AttributeValue, ElementStatus, ElementTable, SeedRequest, release_schedule};
