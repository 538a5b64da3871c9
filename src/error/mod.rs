//! Error handling for the query runner.
//!
//! - Application error kinds (connection, execution, configuration)
//! - Structured JSON rendering of MongoDB driver errors

pub mod kinds;
pub mod mongo;

pub use kinds::{BookstoreError, ConfigError, ConnectionError, ExecutionError, Result};
