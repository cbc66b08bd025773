use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use crate::constants::{DEFAULT_FORM_NAME, DEFAULT_SCHEMA_VERSION};
use crate::logging::LogConfig;

fn default_form_name() -> String {
    DEFAULT_FORM_NAME.to_string()
}

fn default_schema_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

/// Configuration for the form engine.
///
/// ```toml
/// default_form_name = "Contact form"
/// schema_version = "1.0"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name given to the starter schema
    #[serde(default = "default_form_name")]
    pub default_form_name: String,
    /// Version stamp written into every new schema
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_form_name: default_form_name(),
            schema_version: default_schema_version(),
            logging: LogConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.schema_version.trim().is_empty() {
            return Err(ConfigError::validation("schema_version cannot be empty"));
        }
        if self.default_form_name.trim().is_empty() {
            return Err(ConfigError::validation("default_form_name cannot be empty"));
        }
        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = EngineConfig::from_toml_str("default_form_name = \"Signup\"").unwrap();
        assert_eq!(config.default_form_name, "Signup");
        assert_eq!(config.schema_version, DEFAULT_SCHEMA_VERSION);
        assert_eq!(config.logging, LogConfig::default());
    }

    #[test]
    fn test_nested_logging_section() {
        let config = EngineConfig::from_toml_str(
            "schema_version = \"2\"\n[logging]\nlevel = \"debug\"\necho_stdout = false\n",
        )
        .unwrap();
        assert_eq!(config.schema_version, "2");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.echo_stdout);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            EngineConfig::from_toml_str("schema_version = \"\""),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("schema_version = ["),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
