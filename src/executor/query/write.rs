//! Write operations
//!
//! Both writes touch at most one document and treat "no match" as success.

use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::Result;

use super::super::result::ExecutionResult;

impl super::QueryExecutor {
    /// Execute updateOne
    pub(super) async fn execute_update_one(
        &self,
        filter: &Document,
        update: &Document,
    ) -> Result<ExecutionResult> {
        debug!(
            "Executing updateOne on collection '{}' with filter: {:?}",
            self.collection_name(),
            filter
        );

        let result = self
            .collection
            .update_one(filter.clone(), update.clone())
            .await?;

        info!(
            "updateOne matched {} and modified {} document(s)",
            result.matched_count, result.modified_count
        );
        Ok(ExecutionResult::update(
            result.matched_count,
            result.modified_count,
        ))
    }

    /// Execute deleteOne
    pub(super) async fn execute_delete_one(&self, filter: &Document) -> Result<ExecutionResult> {
        debug!(
            "Executing deleteOne on collection '{}' with filter: {:?}",
            self.collection_name(),
            filter
        );

        let result = self.collection.delete_one(filter.clone()).await?;

        info!("deleteOne removed {} document(s)", result.deleted_count);
        Ok(ExecutionResult::delete(result.deleted_count))
    }
}
