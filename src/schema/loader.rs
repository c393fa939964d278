//! Contract registry backed by a directory of schema files
//!
//! - One file per contract: `<dir>/<name>.json`
//! - A contract name, once registered, is immutable
//! - A load either registers every file in the directory or none of them

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;
use super::validator::{validate, ValidationResult};
use crate::observability::Logger;

/// Registry of named schemas.
pub struct SchemaLoader {
    /// Directory containing contract files
    schema_dir: PathBuf,
    /// Registered schemas by contract name
    schemas: HashMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates an empty registry reading from `schema_dir`.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// All files are parsed before anything is registered, so a malformed
    /// file or a name clash leaves the registry unchanged. A missing
    /// directory means there is nothing to load.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            return Ok(());
        }

        let mut staged = Vec::new();
        for path in self.schema_files()? {
            match read_schema_file(&path) {
                Ok((name, schema)) => staged.push((name, schema, path)),
                Err(e) => {
                    let path_str = path.display().to_string();
                    let reason = e.to_string();
                    Logger::error(
                        "CONTRACT_LOAD_FAILED",
                        &[("path", path_str.as_str()), ("reason", reason.as_str())],
                    );
                    return Err(e);
                }
            }
        }

        if let Some((name, _, _)) = staged.iter().find(|(name, _, _)| self.exists(name)) {
            return Err(SchemaError::ContractImmutable(name.clone()));
        }

        for (name, schema, path) in staged {
            let path_str = path.display().to_string();
            Logger::info(
                "CONTRACT_LOADED",
                &[("contract", name.as_str()), ("path", path_str.as_str())],
            );
            self.schemas.insert(name, schema);
        }

        Ok(())
    }

    /// Lists `*.json` files in the schema directory, sorted by path.
    fn schema_files(&self) -> SchemaResult<Vec<PathBuf>> {
        let dir_error = |e: std::io::Error, what: &str| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to read {}: {}", what, e),
            )
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.schema_dir).map_err(|e| dir_error(e, "schema directory"))? {
            let path = entry.map_err(|e| dir_error(e, "directory entry"))?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();
        Ok(paths)
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// `ContractImmutable` if the name is already taken.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> SchemaResult<()> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(SchemaError::ContractImmutable(name));
        }
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Gets a schema by contract name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Checks if a contract is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the number of registered contracts.
    pub fn contract_count(&self) -> usize {
        self.schemas.len()
    }

    /// Registered contract names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validates a payload against the named contract.
    ///
    /// # Errors
    ///
    /// `UnknownContract` if nothing is registered under `name`. Payload
    /// problems are reported in the `ValidationResult`, not as errors.
    pub fn validate(
        &self,
        name: &str,
        payload: &Map<String, Value>,
    ) -> SchemaResult<ValidationResult> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::UnknownContract(name.to_string()))?;
        Ok(validate(schema, payload))
    }

    /// Writes `schema` to `<dir>/<name>.json`, refusing to overwrite.
    ///
    /// # Errors
    ///
    /// - `InvalidContractName` if `name` is empty or would leave the schema
    ///   directory
    /// - `ContractImmutable` if the file already exists
    pub fn save(&self, name: &str, schema: &Schema) -> SchemaResult<PathBuf> {
        check_contract_name(name)?;
        let path = self.schema_dir.join(format!("{}.json", name));

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        let write_error = |e: std::io::Error| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        };

        // create_new makes the existence check and the create one step
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(SchemaError::ContractImmutable(name.to_string()));
            }
            Err(e) => return Err(write_error(e)),
        };
        file.write_all(content.as_bytes()).map_err(write_error)?;
        file.sync_all().map_err(write_error)?;

        Ok(path)
    }
}

/// Reads one schema file. The contract name is the file stem.
fn read_schema_file(path: &Path) -> SchemaResult<(String, Schema)> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            SchemaError::malformed_schema(path.display().to_string(), "Invalid file name")
        })?
        .to_string();

    let content = fs::read_to_string(path).map_err(|e| {
        SchemaError::malformed_schema(
            path.display().to_string(),
            format!("Failed to read file: {}", e),
        )
    })?;

    // Deserialization runs Schema::new, so construction errors land here too
    let schema: Schema = serde_json::from_str(&content).map_err(|e| {
        SchemaError::malformed_schema(
            path.display().to_string(),
            format!("Invalid schema: {}", e),
        )
    })?;

    Ok((name, schema))
}

/// A contract name must be a single, non-empty path component.
fn check_contract_name(name: &str) -> SchemaResult<()> {
    let invalid = name.is_empty()
        || name.contains(['/', '\\', '\0'])
        || name.contains("..")
        || name.starts_with('.');
    if invalid {
        return Err(SchemaError::InvalidContractName(name.to_string()));
    }
    Ok(())
}
