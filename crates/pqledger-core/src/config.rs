//! Ledger configuration types

use pqledger_crypto::{get_instance, registered_algorithms};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Complete ledger configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Post-decode validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl LedgerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate()?;
        self.validation.validate()
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Color output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            color: true,
        }
    }
}

/// Post-decode validation settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// PQ algorithm ids hybrid transactions may use
    #[serde(default = "default_accepted_pq_algorithms")]
    pub accepted_pq_algorithms: Vec<u8>,
}

fn default_accepted_pq_algorithms() -> Vec<u8> {
    registered_algorithms().map(|alg| alg.algorithm_id()).collect()
}

impl ValidationConfig {
    pub fn accepts(&self, algorithm_id: u8) -> bool {
        self.accepted_pq_algorithms.contains(&algorithm_id)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for &id in &self.accepted_pq_algorithms {
            get_instance(id).map_err(|_| ConfigError::UnknownAlgorithm(id))?;
        }
        Ok(())
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            accepted_pq_algorithms: default_accepted_pq_algorithms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
        assert_eq!(config.validation.accepted_pq_algorithms, vec![0x01]);
        assert!(config.validation.accepts(0x01));
        assert!(!config.validation.accepts(0x02));
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let config = LedgerConfig::from_toml_str(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [validation]
            accepted_pq_algorithms = []
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
        assert!(config.logging.color);
        assert!(!config.validation.accepts(0x01));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let err = LedgerConfig::from_toml_str("[validation]\naccepted_pq_algorithms = [1, 7]\n")
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownAlgorithm(7));
    }

    #[test]
    fn test_bad_log_format_rejected() {
        let err = LedgerConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogFormat("xml".to_string()));
    }

    #[test]
    fn test_parse_error() {
        let err = LedgerConfig::from_toml_str("[logging\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"pqledger_core=trace\"").unwrap();

        let config = LedgerConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "pqledger_core=trace");
        assert_eq!(config.validation, ValidationConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = LedgerConfig::load("/nonexistent/pqledger.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
