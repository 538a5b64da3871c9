//! Configuration management
//!
//! Configuration is read from a TOML file and then overridden by
//! command-line arguments. Precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values
//!
//! The defaults point at the `books` collection of the `plp_bookstore`
//! database on a local server.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// MongoDB connection URI
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database holding the book collection
    #[serde(default = "default_database")]
    pub database: String,

    /// Book collection name
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Server selection and connect timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Application name reported to the server
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format (shell, json, json-pretty, table, compact)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Show per-step execution time
    #[serde(default = "default_show_timing")]
    pub show_timing: bool,

    /// Indentation width for shell and pretty JSON output
    #[serde(default = "default_indent")]
    pub indent: usize,
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// mongosh-like output with `ObjectId('...')` style wrappers
    Shell,

    /// Single-line JSON
    Json,

    /// Indented JSON
    JsonPretty,

    /// ASCII table, one row per document
    Table,

    /// Summary only, e.g. "5 document(s) returned"
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "plp_bookstore".to_string()
}

fn default_collection() -> String {
    "books".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_app_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_format() -> OutputFormat {
    OutputFormat::Shell
}

fn default_color_output() -> bool {
    true
}

fn default_show_timing() -> bool {
    false
}

fn default_indent() -> usize {
    2
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
            timeout: default_timeout(),
            app_name: default_app_name(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color_output: default_color_output(),
            show_timing: default_show_timing(),
            indent: default_indent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from an explicit path or the default location
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the default configuration.
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bookstore-queries")
            .join("config.toml")
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.connection.validate()?;

        if self.display.indent == 0 {
            return Err(invalid("display.indent", "0"));
        }

        Ok(())
    }
}

impl ConnectionConfig {
    /// Get the connection timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Validate URI, namespace and timeout
    pub fn validate(&self) -> Result<()> {
        if !validate::is_valid_connection_uri(&self.uri) {
            return Err(invalid("connection.uri", &self.uri));
        }
        if !validate::is_valid_database_name(&self.database) {
            return Err(invalid("connection.database", &self.database));
        }
        if !validate::is_valid_collection_name(&self.collection) {
            return Err(invalid("connection.collection", &self.collection));
        }
        if self.timeout == 0 {
            return Err(invalid("connection.timeout", "0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: &str) -> crate::error::BookstoreError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl OutputFormat {
    /// Check if format is JSON-based
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}

/// MongoDB naming rules
pub mod validate {
    /// Database names: 1-63 bytes, none of `/\. "$*<>:|?`
    pub fn is_valid_database_name(name: &str) -> bool {
        if name.is_empty() || name.len() > 63 {
            return false;
        }

        let invalid_chars = ['/', '\\', '.', ' ', '"', '$', '*', '<', '>', ':', '|', '?', '\0'];
        !name.chars().any(|c| invalid_chars.contains(&c))
    }

    /// Collection names: non-empty, no `$` or NUL, not in the `system.` namespace
    pub fn is_valid_collection_name(name: &str) -> bool {
        if name.is_empty() || name.len() > 120 {
            return false;
        }

        if name.starts_with("system.") {
            return false;
        }

        !name.contains('$') && !name.contains('\0')
    }

    pub fn is_valid_connection_uri(uri: &str) -> bool {
        uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.connection.uri, "mongodb://localhost:27017");
        assert_eq!(config.connection.database, "plp_bookstore");
        assert_eq!(config.connection.collection, "books");
        assert_eq!(config.display.format, OutputFormat::Shell);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [connection]
            database = "library"

            [display]
            format = "json-pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.connection.database, "library");
        assert_eq!(config.connection.collection, "books");
        assert_eq!(config.connection.timeout, 30);
        assert_eq!(config.display.format, OutputFormat::JsonPretty);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = Config::from_toml_str("[display]\nformat = \"xml\"").unwrap_err();
        assert!(err.to_string().contains("Invalid config format"));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = Config::default().to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.connection.uri, "mongodb://localhost:27017");
        assert_eq!(parsed.display.indent, 2);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.connection.uri = "http://localhost".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.connection.timeout = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.connection.collection = "system.books".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.connection.database = "plp.bookstore".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load_from_file(Some(Path::new("/nonexistent/bookstore.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_connection_timeout() {
        let config = Config::default();
        assert_eq!(config.connection.timeout_duration(), Duration::from_secs(30));
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
    }
}
