//! Index creation

use mongodb::IndexModel;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::Result;

use super::super::result::ExecutionResult;

impl super::QueryExecutor {
    /// Ensure an index exists on `keys`
    ///
    /// The server treats re-creating an identical index as a no-op and
    /// reports the existing name. Driver errors are passed through unchanged
    /// so index conflicts keep their server code.
    pub(super) async fn execute_create_index(&self, keys: &Document) -> Result<ExecutionResult> {
        debug!(
            "Creating index on collection '{}' with keys: {:?}",
            self.collection_name(),
            keys
        );

        let model = IndexModel::builder().keys(keys.clone()).build();
        let result = self.collection.create_index(model).await?;

        info!("Index '{}' is in place", result.index_name);
        Ok(ExecutionResult::index_created(result.index_name))
    }
}
