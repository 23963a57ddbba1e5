//! CLI configuration management.
//!
//! Configuration is read from a TOML file (every field optional) and then
//! overridden from `QUOTATION_*` environment variables. A missing file
//! yields the defaults.
//!
//! ```toml
//! currency = "QAR"
//! log_level = "debug"
//! store_path = "data/projects.json"
//!
//! [parameters]
//! duration = 36
//! margin = 18
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use quote_core::{Currency, ParameterSet};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Environment variable overriding the display currency.
pub const ENV_CURRENCY: &str = "QUOTATION_CURRENCY";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "QUOTATION_LOG_LEVEL";
/// Environment variable overriding the project store path.
pub const ENV_STORE_PATH: &str = "QUOTATION_STORE_PATH";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read {path}: {message}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// The config file is not valid TOML for this configuration.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Config file
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// An environment override holds an unusable value.
    #[error("Invalid value '{value}' for {var}")]
    InvalidEnv {
        /// Variable name
        var: &'static str,
        /// Value found
        value: String,
    },

    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// One or more validation failures.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuotationConfig {
    /// Display currency
    pub currency: Currency,
    /// Fallback log level when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// JSON file holding saved projects
    pub store_path: PathBuf,
    /// Base parameter set that workbook parameters are layered over
    pub parameters: ParameterSet,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("quotation-projects.json")
}

impl Default for QuotationConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            log_level: LogLevel::default(),
            store_path: default_store_path(),
            parameters: ParameterSet::default(),
        }
    }
}

impl QuotationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from `path`, or the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `QUOTATION_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_CURRENCY) {
            self.currency = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_CURRENCY,
                value,
            })?;
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LOG_LEVEL,
                value,
            })?;
        }

        if let Some(value) = lookup(ENV_STORE_PATH) {
            self.store_path = PathBuf::from(value);
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.store_path.as_os_str().is_empty() {
            errors.push("store_path cannot be empty".to_string());
        }

        errors.extend(
            self.parameters
                .validate()
                .into_iter()
                .map(|e| format!("parameters: {e}")),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = QuotationConfig::default();
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.store_path, PathBuf::from("quotation-projects.json"));
        assert_eq!(config.parameters, ParameterSet::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml = r#"
            currency = "QAR"
            log_level = "debug"
            store_path = "data/projects.json"

            [parameters]
            duration = 36.0
            margin = 18.0

            [parameters.hra]
            enabled = true
            value = 1200.0
        "#;

        let config: QuotationConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.currency, Currency::QAR);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.store_path, PathBuf::from("data/projects.json"));
        assert_eq!(config.parameters.duration, 36.0);
        assert_eq!(config.parameters.margin, 18.0);
        assert!(config.parameters.hra.enabled);
        // Unspecified parameters keep their defaults
        assert_eq!(config.parameters.working_days, ParameterSet::default().working_days);
    }

    #[test]
    fn test_invalid_log_level_in_file() {
        let result: Result<QuotationConfig, _> = toml::from_str(r#"log_level = "loud""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuotationConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, QuotationConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotation.toml");
        std::fs::write(&path, "currency = \"EUR\"\n").unwrap();

        let config = QuotationConfig::load_or_default(&path).unwrap();
        assert_eq!(config.currency, Currency::EUR);

        std::fs::write(&path, "currency = [").unwrap();
        assert!(matches!(
            QuotationConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = QuotationConfig::default()
            .with_overrides(lookup(&[
                (ENV_CURRENCY, "eur"),
                (ENV_LOG_LEVEL, "trace"),
                (ENV_STORE_PATH, "/tmp/projects.json"),
            ]))
            .unwrap();

        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.store_path, PathBuf::from("/tmp/projects.json"));
    }

    #[test]
    fn test_invalid_env_override() {
        let result = QuotationConfig::default().with_overrides(lookup(&[(ENV_CURRENCY, "GBP")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { var: ENV_CURRENCY, .. })
        ));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = QuotationConfig {
            store_path: PathBuf::new(),
            ..QuotationConfig::default()
        };
        config.parameters.duration = -1.0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("store_path"));
                assert!(errors[1].contains("duration"));
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }
}
