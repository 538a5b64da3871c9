//! Explain support for find

use mongodb::bson::Document;
use tracing::debug;

use crate::error::Result;

use super::super::operation::{ExplainVerbosity, FindOptions, explain_command};
use super::super::result::ExecutionResult;

impl super::QueryExecutor {
    /// Run `explain` on a find and return the plan document
    pub(super) async fn execute_explain(
        &self,
        filter: &Document,
        options: &FindOptions,
        verbosity: ExplainVerbosity,
    ) -> Result<ExecutionResult> {
        debug!(
            "Executing explain on collection '{}' with verbosity: {}",
            self.collection_name(),
            verbosity.as_str()
        );

        let command = explain_command(self.collection_name(), filter, options, verbosity);
        let plan = self.database.run_command(command).await?;

        Ok(ExecutionResult::document(plan))
    }
}
