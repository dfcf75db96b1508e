//! Configuration management for the Hurler extension.
//!
//! Settings arrive as JSON, either as LSP initialization options or in a
//! `workspace/didChangeConfiguration` notification. The parsed record is
//! owned by the caller and passed explicitly into the core functions.

pub mod schema;

pub use schema::HurlerConfig;

use serde_json::Value;

/// Settings key the configuration lives under.
pub const SETTINGS_KEY: &str = "hurler";

/// Loads configuration from a settings JSON value.
///
/// Accepts either an object with a "hurler" key or the settings record itself.
/// Malformed settings are logged and replaced by defaults.
///
/// # Example
///
/// ```
/// use hurler::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "hurler": {
///         "environmentFile": "vars.env",
///         "additionalArgs": "--very-verbose"
///     }
/// });
///
/// let config = load_config(Some(settings));
/// assert_eq!(config.environment_file, "vars.env");
/// assert_eq!(config.additional_args, "--very-verbose");
/// ```
pub fn load_config(settings_json: Option<Value>) -> HurlerConfig {
    let settings = match settings_json {
        Some(Value::Null) | None => return HurlerConfig::default(),
        Some(settings) => settings,
    };

    let section = settings.get(SETTINGS_KEY).cloned().unwrap_or(settings);

    match serde_json::from_value::<HurlerConfig>(section) {
        Ok(config) => config,
        Err(e) => {
            log::warn!(
                "Failed to parse {} settings: {}. Using defaults.",
                SETTINGS_KEY,
                e
            );
            HurlerConfig::default()
        }
    }
}
