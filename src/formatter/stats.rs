//! Statistics line shown under a step's result when timing is enabled

use crate::executor::{ExecutionResult, ResultData};

/// Statistics formatter for step results
pub struct StatsFormatter {
    /// Show execution time
    show_time: bool,
}

impl StatsFormatter {
    pub fn new(show_time: bool) -> Self {
        Self { show_time }
    }

    /// Format execution statistics, or an empty string when disabled
    pub fn format(&self, result: &ExecutionResult) -> String {
        if !self.show_time {
            return String::new();
        }

        let mut parts = vec![format!(
            "Execution time: {}ms",
            result.stats.execution_time_ms
        )];

        match (&result.data, result.stats.documents_affected) {
            (_, Some(count)) => parts.push(format!("Documents affected: {}", count)),
            (ResultData::Documents(_), None) => parts.push(format!(
                "Documents returned: {}",
                result.stats.documents_returned
            )),
            _ => {}
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_stats_disabled() {
        let formatter = StatsFormatter::new(false);
        let result = ExecutionResult::delete(1);
        assert!(formatter.format(&result).is_empty());
    }

    #[test]
    fn test_stats_for_write() {
        let formatter = StatsFormatter::new(true);
        let mut result = ExecutionResult::update(1, 1);
        result.stats.execution_time_ms = 150;
        let stats = formatter.format(&result);
        assert!(stats.contains("150ms"));
        assert!(stats.contains("Documents affected: 1"));
    }

    #[test]
    fn test_stats_for_read() {
        let formatter = StatsFormatter::new(true);
        let result = ExecutionResult::documents(vec![doc! { "a": 1 }, doc! { "a": 2 }]);
        assert_eq!(
            formatter.format(&result),
            "Execution time: 0ms, Documents returned: 2"
        );
    }

    #[test]
    fn test_stats_for_index() {
        let formatter = StatsFormatter::new(true);
        let result = ExecutionResult::index_created("title_1".to_string());
        assert_eq!(formatter.format(&result), "Execution time: 0ms");
    }
}
