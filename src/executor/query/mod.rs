//! Query executor for the book collection
//!
//! Dispatches each [`Operation`] to the sub-module for its kind:
//! - `read`: find
//! - `write`: updateOne, deleteOne
//! - `aggregate`: aggregation pipelines
//! - `index`: createIndex
//! - `explain`: query plans

use std::time::Instant;

use mongodb::bson::Document;
use mongodb::{Collection, Database};

use crate::error::Result;

use super::operation::Operation;
use super::result::ExecutionResult;

mod aggregate;
mod explain;
mod index;
mod read;
mod write;

/// Executes operations against one collection
pub struct QueryExecutor {
    /// Database the collection lives in, used for raw commands
    database: Database,

    /// The book collection
    collection: Collection<Document>,
}

impl QueryExecutor {
    /// Create a new query executor
    ///
    /// # Arguments
    /// * `database` - Database handle
    /// * `collection` - Collection name within that database
    pub fn new(database: Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
            database,
        }
    }

    /// Name of the collection operations run against
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Execute one operation and record its elapsed time
    pub async fn execute(&self, operation: &Operation) -> Result<ExecutionResult> {
        let start = Instant::now();

        let mut result = match operation {
            Operation::Find { filter, options } => self.execute_find(filter, options).await?,
            Operation::UpdateOne { filter, update } => {
                self.execute_update_one(filter, update).await?
            }
            Operation::DeleteOne { filter } => self.execute_delete_one(filter).await?,
            Operation::Aggregate { pipeline } => self.execute_aggregate(pipeline).await?,
            Operation::CreateIndex { keys } => self.execute_create_index(keys).await?,
            Operation::Explain {
                verbosity,
                filter,
                options,
            } => self.execute_explain(filter, options, *verbosity).await?,
        };

        result.stats.execution_time_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }
}
