//! Bookstore queries library
//!
//! Runs a fixed, ordered plan of CRUD, query, aggregation, indexing and
//! explain operations against a MongoDB `books` collection.
//!
//! # Modules
//!
//! - `books`: Book document model
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: MongoDB connection management
//! - `error`: Error types and handling
//! - `executor`: The plan, its operations, the runner and the session
//! - `formatter`: Output formatting and display
//!
//! # Example
//!
//! ```no_run
//! use bookstore_queries::config::ConnectionConfig;
//! use bookstore_queries::connection::ConnectionManager;
//! use bookstore_queries::executor::{
//!     ExecutionResult, ExplainVerbosity, SessionReporter, Step, book_plan, run_session,
//! };
//!
//! struct Labels;
//!
//! impl SessionReporter for Labels {
//!     fn step_completed(&mut self, step: &Step, _: &ExecutionResult) -> bookstore_queries::Result<()> {
//!         println!("{}", step.label);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> bookstore_queries::Result<()> {
//!     let mut manager = ConnectionManager::new(ConnectionConfig::default());
//!     let plan = book_plan(ExplainVerbosity::QueryPlanner);
//!
//!     // The connection is closed again before this returns
//!     run_session(&mut manager, &plan, &mut Labels).await?;
//!     Ok(())
//! }
//! ```

pub mod books;
pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod formatter;

pub use config::Config;
pub use connection::ConnectionManager;
pub use error::{BookstoreError, Result};
pub use formatter::Formatter;
