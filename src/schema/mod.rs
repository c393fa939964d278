//! Payload schemas and their validator
//!
//! # Design Principles
//!
//! - Schemas are built once and never mutated
//! - Configuration mistakes fail at construction
//! - Payload problems are returned as data, in declaration order
//! - Validation is pure and deterministic

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{FieldKind, FieldSchema, Schema, ValueKind};
pub use validator::{
    validate, validate_value, ValidationResult, Validator, Violation, ViolationReason, Violations,
    ROOT_PATH,
};
