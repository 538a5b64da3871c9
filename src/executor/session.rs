//! One run of the plan over a managed connection
//!
//! Connects, runs the plan and shuts the client down afterwards whether or
//! not anything failed. A failure is reported before the connection is
//! closed and then returned to the caller.

use tracing::{info, warn};

use crate::connection::ConnectionManager;
use crate::error::{BookstoreError, Result};

use super::plan::Step;
use super::query::QueryExecutor;
use super::result::ExecutionResult;
use super::runner::BookQueryRunner;

/// Receives the events of a session as they happen
pub trait SessionReporter {
    /// The connection is established and answered a ping
    fn connected(&mut self) {}

    /// A step finished; returning an error aborts the remaining steps
    fn step_completed(&mut self, step: &Step, result: &ExecutionResult) -> Result<()>;

    /// The session stopped on `error`; the connection is still open
    fn failed(&mut self, _error: &BookstoreError) {}

    /// The connection has been shut down
    fn closed(&mut self) {}
}

/// Connect, run every step of `plan` and disconnect
///
/// Disconnects even when connecting or a step fails.
///
/// # Returns
/// * `Result<usize>` - Number of steps completed
pub async fn run_session<R: SessionReporter>(
    connection: &mut ConnectionManager,
    plan: &[Step],
    reporter: &mut R,
) -> Result<usize> {
    let outcome = run_connected(connection, plan, reporter).await;

    if let Err(e) = &outcome {
        reporter.failed(e);
    }

    connection.disconnect().await;
    reporter.closed();

    outcome
}

async fn run_connected<R: SessionReporter>(
    connection: &mut ConnectionManager,
    plan: &[Step],
    reporter: &mut R,
) -> Result<usize> {
    connection.connect().await?;
    reporter.connected();

    match connection.server_version().await {
        Ok(version) => info!("MongoDB server version {}", version),
        Err(e) => warn!("Could not read server version: {}", e),
    }

    let executor = QueryExecutor::new(
        connection.book_database()?,
        &connection.config().collection,
    );
    let completed = BookQueryRunner::new(executor)
        .run(plan, |step, result| reporter.step_completed(step, result))
        .await?;

    info!("Completed {} of {} steps", completed, plan.len());
    Ok(completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionConfig;
    use crate::connection::ConnectionState;
    use crate::executor::{ExplainVerbosity, book_plan};
    use tokio_test::assert_err;

    /// Records event names in the order they arrive
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SessionReporter for Recorder {
        fn connected(&mut self) {
            self.events.push("connected".to_string());
        }

        fn step_completed(&mut self, step: &Step, _result: &ExecutionResult) -> Result<()> {
            self.events.push(step.label.clone());
            Ok(())
        }

        fn failed(&mut self, _error: &BookstoreError) {
            self.events.push("failed".to_string());
        }

        fn closed(&mut self) {
            self.events.push("closed".to_string());
        }
    }

    fn manager(uri: &str) -> ConnectionManager {
        ConnectionManager::new(ConnectionConfig {
            uri: uri.to_string(),
            timeout: 1,
            ..ConnectionConfig::default()
        })
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_error_then_closes() {
        let mut connection = manager("mongodb://127.0.0.1:1");
        let mut recorder = Recorder::default();
        let plan = book_plan(ExplainVerbosity::QueryPlanner);

        let err = assert_err!(run_session(&mut connection, &plan, &mut recorder).await);

        assert!(err.to_string().contains("Ping failed"));
        assert_eq!(recorder.events, vec!["failed", "closed"]);
        assert_eq!(connection.state(), &ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_invalid_uri_still_closes() {
        let mut connection = manager("mongodb://");
        let mut recorder = Recorder::default();

        let err = assert_err!(run_session(&mut connection, &[], &mut recorder).await);

        assert!(err.to_string().contains("Invalid connection URI"));
        assert_eq!(recorder.events, vec!["failed", "closed"]);
        assert_eq!(connection.state(), &ConnectionState::Disconnected);
    }
}
