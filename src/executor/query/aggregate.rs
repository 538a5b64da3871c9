//! Aggregation pipelines

use futures::stream::TryStreamExt;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::{ExecutionError, Result};

use super::super::result::ExecutionResult;

impl super::QueryExecutor {
    /// Execute an aggregation pipeline and collect its output
    pub(super) async fn execute_aggregate(
        &self,
        pipeline: &[Document],
    ) -> Result<ExecutionResult> {
        debug!(
            "Executing aggregate on collection '{}' with {} pipeline stages",
            self.collection_name(),
            pipeline.len()
        );

        let mut cursor = self
            .collection
            .aggregate(pipeline.to_vec())
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

        info!("Aggregation returned {} documents", documents.len());
        Ok(ExecutionResult::documents(documents))
    }
}
