//! Configuration schema for the Hurler extension.
//!
//! This module defines the settings users can place under the "hurler" key.

use crate::language_server::EnvironmentSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the Hurler extension.
///
/// Missing settings fall back to empty strings, which disable the
/// corresponding feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HurlerConfig {
    /// Path to the `key=value` variables file.
    ///
    /// Absolute, or relative to the workspace root. Passed to `hurl` as
    /// `--variables-file` and used to resolve placeholders on hover.
    /// Defaults to empty (no variables file).
    #[serde(default)]
    pub environment_file: String,

    /// Extra command-line arguments appended verbatim to every `hurl` run.
    ///
    /// Defaults to empty.
    #[serde(default)]
    pub additional_args: String,
}

impl HurlerConfig {
    /// Creates a configuration from its two settings.
    pub fn new(environment_file: impl Into<String>, additional_args: impl Into<String>) -> Self {
        Self {
            environment_file: environment_file.into(),
            additional_args: additional_args.into(),
        }
    }

    /// Builds the explicit settings record consumed by the hover lookup.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Workspace root, or an empty path when none is known
    pub fn environment_settings(&self, base_path: &Path) -> EnvironmentSettings {
        EnvironmentSettings::new(self.environment_file.clone(), base_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = HurlerConfig::default();
        assert_eq!(config.environment_file, "");
        assert_eq!(config.additional_args, "");
    }

    #[test]
    fn test_deserialization_camel_case() {
        let json = r#"{
            "environmentFile": "env/dev.env",
            "additionalArgs": "--test --color"
        }"#;

        let config: HurlerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.environment_file, "env/dev.env");
        assert_eq!(config.additional_args, "--test --color");
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let config: HurlerConfig = serde_json::from_str(r#"{"additionalArgs": "-v"}"#).unwrap();
        assert_eq!(config.environment_file, "");
        assert_eq!(config.additional_args, "-v");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&HurlerConfig::new("vars.env", "")).unwrap();
        assert!(json.contains("environmentFile"));
        assert!(json.contains("additionalArgs"));
    }

    #[test]
    fn test_environment_settings() {
        let config = HurlerConfig::new("vars.env", "");
        let settings = config.environment_settings(Path::new("/ws"));

        assert_eq!(settings.environment_file, "vars.env");
        assert_eq!(settings.base_path, PathBuf::from("/ws"));
    }
}
