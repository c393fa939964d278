//! Validator configuration
//!
//! Defaults match the free `validate` function: `.` joins nested paths and
//! nothing is logged.

use serde::{Deserialize, Serialize};

/// Default separator between a parent field and its nested fields
pub const DEFAULT_PATH_SEPARATOR: &str = ".";

/// Configuration for a `Validator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Joins parent and child names in nested violation paths.
    pub path_separator: String,
    /// Emit one log event per violation (and one per valid payload).
    pub log_violations: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            log_violations: false,
        }
    }
}

impl ValidatorConfig {
    /// Create config with violation logging enabled.
    pub fn logging() -> Self {
        Self {
            log_violations: true,
            ..Self::default()
        }
    }

    /// Use a different nested path separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Joins a parent path and a child field name.
    pub fn join_path(&self, parent: &str, child: &str) -> String {
        if parent.is_empty() {
            child.to_string()
        } else {
            format!("{}{}{}", parent, self.path_separator, child)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ValidatorConfig::default();
        assert_eq!(config.path_separator, ".");
        assert!(!config.log_violations);
    }

    #[test]
    fn test_config_logging() {
        assert!(ValidatorConfig::logging().log_violations);
    }

    #[test]
    fn test_join_path() {
        let config = ValidatorConfig::default();
        assert_eq!(config.join_path("", "lat"), "lat");
        assert_eq!(config.join_path("location", "lat"), "location.lat");
        assert_eq!(
            config.with_separator("/").join_path("location", "lat"),
            "location/lat"
        );
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{ "log_violations": true }"#).unwrap();
        assert_eq!(config.path_separator, ".");
        assert!(config.log_violations);
    }
}
