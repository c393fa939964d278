//! Schema type definitions
//!
//! Supported field kinds:
//! - number: integer or floating point
//! - string: UTF-8 string
//! - object: mapping, optionally with a nested schema
//! - boolean: true or false
//! - array: any array

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use super::errors::{SchemaError, SchemaResult};

/// Kind a schema field expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Integer or floating point number
    Number,
    /// UTF-8 string
    String,
    /// Mapping of string keys to values
    Object,
    /// Boolean
    Boolean,
    /// Array of any values
    Array,
}

impl FieldKind {
    /// Returns the kind name for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
            FieldKind::Object => "object",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
        }
    }

    /// Whether a value of the observed kind satisfies this kind
    pub fn accepts(&self, actual: ValueKind) -> bool {
        matches!(
            (self, actual),
            (FieldKind::Number, ValueKind::Number)
                | (FieldKind::String, ValueKind::String)
                | (FieldKind::Object, ValueKind::Object)
                | (FieldKind::Boolean, ValueKind::Boolean)
                | (FieldKind::Array, ValueKind::Array)
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind observed on a payload value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    String,
    Object,
    Boolean,
    Array,
    Null,
}

impl ValueKind {
    /// Classifies a JSON value. Integers and floats are both `Number`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns the kind name for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_required() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// One expected field of a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Key in the payload mapping
    pub name: String,
    /// Expected kind
    pub kind: FieldKind,
    /// Whether the field must be present
    #[serde(default = "default_required", skip_serializing_if = "is_true")]
    pub required: bool,
    /// Schema for the field's value, only for `object` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Schema>,
}

impl FieldSchema {
    /// Create a required field with no nested schema
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            nested: None,
        }
    }

    /// Mark the field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a nested schema
    ///
    /// Only meaningful for `object` fields; `Schema::new` rejects it otherwise.
    pub fn with_nested(mut self, nested: Schema) -> Self {
        self.nested = Some(nested);
        self
    }

    /// Create a required number field
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Create a required string field
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Create a required boolean field
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Create a required array field
    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Array)
    }

    /// Create a required object field validated against `nested`
    pub fn object(name: impl Into<String>, nested: Schema) -> Self {
        Self::new(name, FieldKind::Object).with_nested(nested)
    }
}

/// Ordered set of uniquely named fields
///
/// Immutable once built. Construction is the only place configuration
/// errors can surface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSchema>", into = "Vec<FieldSchema>")]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Build a schema from fields in declaration order
    ///
    /// # Errors
    ///
    /// - `DuplicateField` if two fields share a name
    /// - `NestedOnNonObject` if a non-object field carries a nested schema
    pub fn new(fields: Vec<FieldSchema>) -> SchemaResult<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if field.nested.is_some() && field.kind != FieldKind::Object {
                return Err(SchemaError::NestedOnNonObject {
                    field: field.name.clone(),
                    kind: field.kind.to_string(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// Builds a schema from fields already known to be unique and well formed.
    pub(crate) fn from_checked_fields(fields: Vec<FieldSchema>) -> Self {
        debug_assert!(Schema::new(fields.clone()).is_ok());
        Self { fields }
    }

    /// Schema with no fields; every mapping satisfies it
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Vec<FieldSchema>> for Schema {
    type Error = SchemaError;

    fn try_from(fields: Vec<FieldSchema>) -> SchemaResult<Self> {
        Schema::new(fields)
    }
}

impl From<Schema> for Vec<FieldSchema> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}
