//! Configuration management for Budget Bridge
//!
//! Settings come from an optional config file overlaid by process environment
//! variables. The variable names match the ones the deployed handler has always
//! been given (`SLACK_WEBHOOK_URL`, `ENVIRONMENT`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Webhook that receives the rendered alert
    #[serde(default)]
    pub slack_webhook_url: Option<String>,

    /// Environment display name rendered into the alert
    #[serde(default)]
    pub environment: Option<String>,

    /// Logging configuration
    #[serde(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an optional file plus the process environment.
    ///
    /// Environment variables win over file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(config::Environment::default().try_parsing(false))
            .build()?
            .try_deserialize::<Self>()?;

        Ok(config)
    }

    /// The webhook URL, or a configuration error if none was provided
    pub fn webhook_url(&self) -> Result<&str> {
        match self.slack_webhook_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(Error::config("SLACK_WEBHOOK_URL is not set")),
        }
    }

    /// The environment display name; empty when unset
    pub fn environment_name(&self) -> &str {
        self.environment.as_deref().unwrap_or_default()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level", rename = "log_level")]
    pub level: String,
    /// Log format (json or pretty)
    #[serde(default = "default_log_format", rename = "log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_webhook_url_required() {
        let config = Config::default();
        assert!(matches!(config.webhook_url(), Err(Error::Config(_))));

        let blank = Config {
            slack_webhook_url: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(blank.webhook_url().is_err());
    }

    #[test]
    fn test_environment_name_defaults_to_empty() {
        let config = Config::default();
        assert_eq!(config.environment_name(), "");

        let config = Config {
            environment: Some("production".to_string()),
            ..Config::default()
        };
        assert_eq!(config.environment_name(), "production");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "slack_webhook_url = \"https://hooks.example.com/services/T000/B000/XXXX\"\n\
             environment = \"staging\"\n\
             log_format = \"json\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        // The process environment may override these; only assert what it cannot.
        if std::env::var_os("SLACK_WEBHOOK_URL").is_none() {
            assert_eq!(
                config.webhook_url().unwrap(),
                "https://hooks.example.com/services/T000/B000/XXXX"
            );
        }
        if std::env::var_os("ENVIRONMENT").is_none() {
            assert_eq!(config.environment_name(), "staging");
        }
        if std::env::var_os("LOG_FORMAT").is_none() {
            assert_eq!(config.logging.format, "json");
        }
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/budget-bridge.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
