//! Sequential plan runner
//!
//! Runs steps one at a time in plan order. The first failure stops the run
//! and is returned with the label of the failing step; nothing is retried
//! and earlier writes are not rolled back.

use tracing::{info, warn};

use crate::error::{ExecutionError, Result};

use super::plan::Step;
use super::query::QueryExecutor;
use super::result::ExecutionResult;

/// Runs a plan against one collection
pub struct BookQueryRunner {
    executor: QueryExecutor,
}

impl BookQueryRunner {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }

    /// Run every step, handing each result to `on_result` before the next
    /// step starts
    ///
    /// # Returns
    /// * `Result<usize>` - Number of steps completed
    pub async fn run<F>(&self, plan: &[Step], mut on_result: F) -> Result<usize>
    where
        F: FnMut(&Step, &ExecutionResult) -> Result<()>,
    {
        let total = plan.len();

        for (index, step) in plan.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, total, step.label);

            let result = match self.executor.execute(&step.operation).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(
                        "Step {} of {} failed, skipping the remaining {}",
                        index + 1,
                        total,
                        total - index - 1
                    );
                    return Err(ExecutionError::StepFailed {
                        step: step.label.clone(),
                        source: Box::new(e),
                    }
                    .into());
                }
            };

            on_result(step, &result)?;
        }

        Ok(total)
    }
}
