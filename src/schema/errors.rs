//! Schema error types
//!
//! Two tiers:
//! - Configuration errors: raised when a schema is built, loaded or looked up
//! - Contract violations: only raised when a caller turns a
//!   `ValidationResult` into a `Result` on purpose
//!
//! Missing fields and wrong kinds are otherwise reported as data, never as
//! errors.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields in the same schema share a name
    #[error("Duplicate field '{0}' in schema")]
    DuplicateField(String),

    /// A nested schema was declared on a field that is not an object
    #[error("Field '{field}' declares a nested schema but has kind '{kind}'")]
    NestedOnNonObject { field: String, kind: String },

    /// A schema file could not be read or parsed
    #[error("Malformed schema file '{path}': {reason}")]
    MalformedSchema { path: String, reason: String },

    /// A contract name is already registered
    #[error("Contract '{0}' is already registered and immutable")]
    ContractImmutable(String),

    /// Contract name cannot be used as a file name in the schema directory
    #[error("Invalid contract name '{0}'")]
    InvalidContractName(String),

    /// No contract registered under this name
    #[error("Contract '{0}' not found")]
    UnknownContract(String),

    /// A payload failed validation and the caller asked for an error
    #[error("Payload violates contract ({count} violation(s)): {summary}")]
    ContractViolated { count: usize, summary: String },
}

impl SchemaError {
    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::MalformedSchema {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::DuplicateField(_) => "CONTRACT_DUPLICATE_FIELD",
            SchemaError::NestedOnNonObject { .. } => "CONTRACT_NESTED_ON_NON_OBJECT",
            SchemaError::MalformedSchema { .. } => "CONTRACT_MALFORMED_SCHEMA",
            SchemaError::ContractImmutable(_) => "CONTRACT_IMMUTABLE",
            SchemaError::InvalidContractName(_) => "CONTRACT_INVALID_NAME",
            SchemaError::UnknownContract(_) => "CONTRACT_UNKNOWN",
            SchemaError::ContractViolated { .. } => "CONTRACT_VIOLATED",
        }
    }

    /// Whether this error comes from schema configuration rather than a payload
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, SchemaError::ContractViolated { .. })
    }
}
