//! payload-contract - declarative field/kind contracts for structured payloads
//!
//! ```
//! use payload_contract::{contracts, validate_value, FieldKind, ValueKind, Violation};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "gallons": "15.5",
//!     "totalCost": 45.75,
//!     "location": { "lat": 40.0, "lng": -75.0 },
//!     "date": "2025-08-17T12:00:00Z"
//! });
//! let result = validate_value(&contracts::fuel_entry(), &payload);
//! assert_eq!(
//!     result.violations(),
//!     &[Violation::wrong_type("gallons", FieldKind::Number, ValueKind::String)]
//! );
//! ```

pub mod config;
pub mod contracts;
pub mod observability;
pub mod schema;

pub use config::ValidatorConfig;
pub use schema::{
    validate, validate_value, FieldKind, FieldSchema, Schema, SchemaError, SchemaLoader,
    SchemaResult, ValidationResult, Validator, ValueKind, Violation, ViolationReason, Violations,
};
