use std::{fmt, io};

use crate::error::mongo::format_mongodb_error;

/// Crate-wide `Result` type using [`BookstoreError`] as the error.
pub type Result<T> = std::result::Result<T, BookstoreError>;

/// Top-level error type for the query runner.
///
/// Every failure, whether the server is unreachable, a command is rejected
/// or the config file is malformed, ends up here and is reported once by
/// `main`.
#[derive(Debug)]
pub enum BookstoreError {
    /// Connection-related errors.
    Connection(ConnectionError),

    /// Operation execution errors.
    Execution(ExecutionError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Invalid connection URI.
    InvalidUri(String),

    /// Not currently connected to MongoDB.
    NotConnected,

    /// Ping command failed.
    PingFailed(String),
}

/// Execution-specific errors.
#[derive(Debug)]
pub enum ExecutionError {
    /// Query execution failed.
    QueryFailed(String),

    /// Cursor error.
    CursorError(String),

    /// A step of the plan failed; the remaining steps were not run.
    StepFailed {
        step: String,
        source: Box<BookstoreError>,
    },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for BookstoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookstoreError::Connection(e) => write!(f, "Connection error: {e}"),
            BookstoreError::Execution(e) => write!(f, "{e}"),
            BookstoreError::Config(e) => write!(f, "Configuration error: {e}"),
            BookstoreError::Io(e) => write!(f, "I/O error: {e}"),
            BookstoreError::MongoDb(e) => format_mongodb_error(f, e),
            BookstoreError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::NotConnected => write!(f, "Not connected to MongoDB"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            ExecutionError::CursorError(msg) => write!(f, "Cursor error: {msg}"),
            ExecutionError::StepFailed { step, source } => {
                write!(f, "Step '{step}' failed: {source}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for BookstoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookstoreError::Io(e) => Some(e),
            BookstoreError::MongoDb(e) => Some(e),
            BookstoreError::Execution(ExecutionError::StepFailed { source, .. }) => {
                Some(source.as_ref())
            }
            _ => None,
        }
    }
}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ExecutionError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to BookstoreError ========================= */

impl From<io::Error> for BookstoreError {
    fn from(err: io::Error) -> Self {
        BookstoreError::Io(err)
    }
}

impl From<mongodb::error::Error> for BookstoreError {
    fn from(err: mongodb::error::Error) -> Self {
        BookstoreError::MongoDb(err)
    }
}

impl From<ConnectionError> for BookstoreError {
    fn from(err: ConnectionError) -> Self {
        BookstoreError::Connection(err)
    }
}

impl From<ExecutionError> for BookstoreError {
    fn from(err: ExecutionError) -> Self {
        BookstoreError::Execution(err)
    }
}

impl From<ConfigError> for BookstoreError {
    fn from(err: ConfigError) -> Self {
        BookstoreError::Config(err)
    }
}

impl From<String> for BookstoreError {
    fn from(msg: String) -> Self {
        BookstoreError::Generic(msg)
    }
}

impl From<&str> for BookstoreError {
    fn from(msg: &str) -> Self {
        BookstoreError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_step_failure_names_step() {
        let err: BookstoreError = ExecutionError::StepFailed {
            step: "Books by George Orwell".to_string(),
            source: Box::new(ExecutionError::QueryFailed("boom".to_string()).into()),
        }
        .into();

        let msg = err.to_string();
        assert!(msg.contains("Books by George Orwell"));
        assert!(msg.contains("Query failed: boom"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_display() {
        let err = BookstoreError::from(ConfigError::InvalidValue {
            field: "connection.timeout".to_string(),
            value: "0".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value '0' for field 'connection.timeout'"
        );
    }

    #[test]
    fn test_from_str() {
        let err: BookstoreError = "plain failure".into();
        assert_eq!(err.to_string(), "plain failure");
    }
}
