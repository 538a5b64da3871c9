//! Execution result types
//!
//! - ExecutionResult: outcome of one operation
//! - ResultData: what the operation returned
//! - ExecutionStats: timing and counts

use mongodb::bson::Document;

/// Result of one operation
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Result data (documents, write counts, etc.)
    pub data: ResultData,

    /// Execution statistics
    pub stats: ExecutionStats,
}

/// Data returned from an operation
#[derive(Debug, Clone, PartialEq)]
pub enum ResultData {
    /// Documents from a find or aggregate
    Documents(Vec<Document>),

    /// Single document, e.g. an explain plan
    Document(Document),

    /// Update result
    Update { matched: u64, modified: u64 },

    /// Delete result
    Delete { deleted: u64 },

    /// Name of the index that now exists
    IndexCreated { name: String },
}

/// Execution statistics
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Number of documents returned
    pub documents_returned: usize,

    /// Number of documents affected by a write
    pub documents_affected: Option<u64>,
}

impl ExecutionResult {
    pub fn documents(documents: Vec<Document>) -> Self {
        let count = documents.len();
        Self {
            data: ResultData::Documents(documents),
            stats: ExecutionStats {
                documents_returned: count,
                ..Default::default()
            },
        }
    }

    pub fn document(document: Document) -> Self {
        Self {
            data: ResultData::Document(document),
            stats: ExecutionStats {
                documents_returned: 1,
                ..Default::default()
            },
        }
    }

    pub fn update(matched: u64, modified: u64) -> Self {
        Self {
            data: ResultData::Update { matched, modified },
            stats: ExecutionStats {
                documents_affected: Some(modified),
                ..Default::default()
            },
        }
    }

    pub fn delete(deleted: u64) -> Self {
        Self {
            data: ResultData::Delete { deleted },
            stats: ExecutionStats {
                documents_affected: Some(deleted),
                ..Default::default()
            },
        }
    }

    pub fn index_created(name: String) -> Self {
        Self {
            data: ResultData::IndexCreated { name },
            stats: ExecutionStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_documents_result_counts() {
        let result = ExecutionResult::documents(vec![doc! { "a": 1 }, doc! { "a": 2 }]);
        assert_eq!(result.stats.documents_returned, 2);
        assert_eq!(result.stats.documents_affected, None);
    }

    #[test]
    fn test_write_results_record_affected() {
        let update = ExecutionResult::update(1, 0);
        assert_eq!(update.data, ResultData::Update { matched: 1, modified: 0 });
        assert_eq!(update.stats.documents_affected, Some(0));

        let delete = ExecutionResult::delete(0);
        assert_eq!(delete.stats.documents_affected, Some(0));
    }
}
