//! Payload validation against a `Schema`
//!
//! Validation semantics:
//! - Fields are checked in declaration order
//! - A missing required field is reported once, nothing else is checked for it
//! - A missing optional field is skipped
//! - A present field must have the declared kind (`number` takes ints and floats)
//! - Object fields with a nested schema are checked recursively, with violations
//!   reported under `parent.child`
//! - Undeclared keys are ignored
//!
//! Findings are data, never errors. The validator does not mutate its inputs.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::io::{self, Write};
use std::ops::Deref;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldKind, Schema, ValueKind};
use crate::config::ValidatorConfig;
use crate::observability::{Logger, Severity};

/// Path reported when the payload itself is not a mapping
pub const ROOT_PATH: &str = "$root";

/// Why a field failed its contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ViolationReason {
    /// Required field absent from the payload
    MissingField,
    /// Field present with the wrong kind
    WrongType {
        expected: FieldKind,
        actual: ValueKind,
    },
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::MissingField => write!(f, "missing field"),
            ViolationReason::WrongType { expected, actual } => {
                write!(f, "expected {}, got {}", expected, actual)
            }
        }
    }
}

/// A single discrepancy between payload and schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Full field path (e.g., "location.lat")
    pub field: String,
    #[serde(flatten)]
    pub reason: ViolationReason,
}

impl Violation {
    /// Create a missing field violation
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: ViolationReason::MissingField,
        }
    }

    /// Create a wrong kind violation
    pub fn wrong_type(field: impl Into<String>, expected: FieldKind, actual: ValueKind) -> Self {
        Self {
            field: field.into(),
            reason: ViolationReason::WrongType { expected, actual },
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.reason)
    }
}

/// Ordered, non-empty list of violations
///
/// Only `ValidationResult::from_violations` builds one, so an `Invalid`
/// result always carries at least one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Violations in report order
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Takes ownership of the list
    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl Deref for Violations {
    type Target = [Violation];

    fn deref(&self) -> &[Violation] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of one validation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "violations", rename_all = "lowercase")]
pub enum ValidationResult {
    Valid,
    Invalid(Violations),
}

impl ValidationResult {
    /// `Valid` for an empty list, `Invalid` otherwise
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(Violations(violations))
        }
    }

    /// Whether the payload satisfied the schema
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Violations in report order; empty when valid
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(violations) => violations.as_slice(),
        }
    }

    /// Takes the violations out; empty when valid
    pub fn into_violations(self) -> Vec<Violation> {
        match self {
            ValidationResult::Valid => Vec::new(),
            ValidationResult::Invalid(violations) => violations.into_vec(),
        }
    }

    /// Converts an invalid result into `SchemaError::ContractViolated`.
    pub fn into_result(self) -> SchemaResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(violations) => Err(SchemaError::ContractViolated {
                count: violations.len(),
                summary: summarize(&violations),
            }),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Valid => write!(f, "valid"),
            ValidationResult::Invalid(violations) => {
                write!(f, "invalid: {}", summarize(violations))
            }
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates a payload mapping with the default configuration.
pub fn validate(schema: &Schema, payload: &Map<String, Value>) -> ValidationResult {
    let mut violations = Vec::new();
    check_object(schema, payload, "", &ValidatorConfig::default(), &mut violations);
    ValidationResult::from_violations(violations)
}

/// Validates any JSON value; a non-object root is reported at `$root`.
pub fn validate_value(schema: &Schema, value: &Value) -> ValidationResult {
    match value.as_object() {
        Some(payload) => validate(schema, payload),
        None => root_mismatch(value),
    }
}

fn root_mismatch(value: &Value) -> ValidationResult {
    ValidationResult::from_violations(vec![Violation::wrong_type(
        ROOT_PATH,
        FieldKind::Object,
        ValueKind::of(value),
    )])
}

/// Validator bound to a configuration.
///
/// Stateless apart from its config, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a payload mapping against `schema`.
    pub fn validate(&self, schema: &Schema, payload: &Map<String, Value>) -> ValidationResult {
        let mut violations = Vec::new();
        check_object(schema, payload, "", &self.config, &mut violations);
        let result = ValidationResult::from_violations(violations);
        self.observe(&result);
        result
    }

    /// Validates any JSON value; a non-object root is reported at `$root`.
    pub fn validate_value(&self, schema: &Schema, value: &Value) -> ValidationResult {
        match value.as_object() {
            Some(payload) => self.validate(schema, payload),
            None => {
                let result = root_mismatch(value);
                self.observe(&result);
                result
            }
        }
    }

    fn observe(&self, result: &ValidationResult) {
        self.observe_to(result, &mut io::stdout());
    }

    /// One TRACE line for a valid payload, one WARN line per violation.
    fn observe_to<W: Write>(&self, result: &ValidationResult, writer: &mut W) {
        if !self.config.log_violations {
            return;
        }
        match result {
            ValidationResult::Valid => {
                Logger::log_to(writer, Severity::Trace, "CONTRACT_VALID", &[]);
            }
            ValidationResult::Invalid(violations) => {
                for violation in violations {
                    let reason = violation.reason.to_string();
                    Logger::log_to(
                        writer,
                        Severity::Warn,
                        "CONTRACT_VIOLATION",
                        &[("field", violation.field.as_str()), ("reason", reason.as_str())],
                    );
                }
            }
        }
    }
}

/// Checks one mapping level, appending to `out` in declaration order.
fn check_object(
    schema: &Schema,
    payload: &Map<String, Value>,
    path_prefix: &str,
    config: &ValidatorConfig,
    out: &mut Vec<Violation>,
) {
    for field in schema.fields() {
        let field_path = config.join_path(path_prefix, &field.name);

        let value = match payload.get(&field.name) {
            Some(value) => value,
            None => {
                if field.required {
                    out.push(Violation::missing_field(field_path));
                }
                continue;
            }
        };

        let actual = ValueKind::of(value);
        if !field.kind.accepts(actual) {
            out.push(Violation::wrong_type(field_path, field.kind, actual));
            continue;
        }

        if let (Some(nested), Some(obj)) = (&field.nested, value.as_object()) {
            check_object(nested, obj, &field_path, config, out);
        }
    }
}
