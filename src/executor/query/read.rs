//! Read operations

use futures::stream::TryStreamExt;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::{ExecutionError, Result};

use super::super::operation::FindOptions;
use super::super::result::ExecutionResult;

impl super::QueryExecutor {
    /// Execute find and drain the cursor
    ///
    /// Projection, sort, skip and limit are applied server-side.
    pub(super) async fn execute_find(
        &self,
        filter: &Document,
        options: &FindOptions,
    ) -> Result<ExecutionResult> {
        debug!(
            "Executing find on collection '{}' with filter: {:?}, options: {:?}",
            self.collection_name(),
            filter,
            options
        );

        let mut cursor = self
            .collection
            .find(filter.clone())
            .with_options(options.to_driver_options())
            .await
            .map_err(|e| ExecutionError::QueryFailed(e.to_string()))?;

        let mut documents = Vec::new();
        while let Some(doc) = cursor
            .try_next()
            .await
            .map_err(|e| ExecutionError::CursorError(e.to_string()))?
        {
            documents.push(doc);
        }

        info!("find returned {} documents", documents.len());
        Ok(ExecutionResult::documents(documents))
    }
}
