//! JSON formatting for operation results
//!
//! BSON types are simplified to plain JSON (see [`JsonConverter`]). Write
//! results use the same field names the server reports: `matchedCount`,
//! `modifiedCount` and `deletedCount`.

use colored_json::prelude::*;
use mongodb::bson::Document;
use serde_json::{Value as JsonValue, json};

use super::bson_utils::JsonConverter;
use crate::error::Result;
use crate::executor::ResultData;

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Indentation width for pretty output
    indent: usize,

    /// Enable colored output
    use_colors: bool,

    /// Converter for BSON to JSON
    converter: JsonConverter,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `pretty` - Enable pretty printing
    /// * `use_colors` - Enable colored output (pretty mode only)
    /// * `indent` - Indentation width for pretty output
    pub fn new(pretty: bool, use_colors: bool, indent: usize) -> Self {
        Self {
            pretty,
            indent,
            use_colors,
            converter: JsonConverter::new(),
        }
    }

    /// Format result data as JSON
    ///
    /// # Arguments
    /// * `data` - Result data to format
    ///
    /// # Returns
    /// * `Result<String>` - JSON string or error
    pub fn format(&self, data: &ResultData) -> Result<String> {
        self.render(&self.to_json(data))
    }

    /// Format a single document as a JSON object
    pub fn format_document(&self, doc: &Document) -> Result<String> {
        self.render(&self.converter.convert_document(doc))
    }

    fn to_json(&self, data: &ResultData) -> JsonValue {
        match data {
            ResultData::Documents(docs) => JsonValue::Array(
                docs.iter()
                    .map(|doc| self.converter.convert_document(doc))
                    .collect(),
            ),
            ResultData::Document(doc) => self.converter.convert_document(doc),
            ResultData::Update { matched, modified } => json!({
                "matchedCount": matched,
                "modifiedCount": modified,
            }),
            ResultData::Delete { deleted } => json!({ "deletedCount": deleted }),
            ResultData::IndexCreated { name } => JsonValue::String(name.clone()),
        }
    }

    fn render(&self, value: &JsonValue) -> Result<String> {
        if !self.pretty {
            // Compact JSON stays uncolored for piping/logging
            return serde_json::to_string(value).map_err(|e| e.to_string().into());
        }

        let json_str = self.to_pretty_string(value)?;
        if self.use_colors {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }

    /// Pretty-print with the configured indentation width
    fn to_pretty_string(&self, value: &JsonValue) -> Result<String> {
        use serde::Serialize;

        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser).map_err(|e| e.to_string())?;
        String::from_utf8(buf).map_err(|e| e.to_string().into())
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(true, false, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_json_formatter_compact_document() {
        let formatter = JsonFormatter::new(false, false, 2);
        let doc = doc! { "title": "1984", "price": 10.99 };
        let result = formatter.format_document(&doc).unwrap();
        assert_eq!(result, r#"{"title":"1984","price":10.99}"#);
    }

    #[test]
    fn test_json_formatter_simplified_objectid() {
        use mongodb::bson::oid::ObjectId;
        let formatter = JsonFormatter::default();
        let oid = ObjectId::parse_str("65705d84dfc3f3b5094e1f72").unwrap();
        let result = formatter.format_document(&doc! { "_id": oid }).unwrap();
        assert!(result.contains("\"_id\": \"65705d84dfc3f3b5094e1f72\""));
        assert!(!result.contains("$oid"));
    }

    #[test]
    fn test_json_formatter_documents_array() {
        let formatter = JsonFormatter::new(false, false, 2);
        let data = ResultData::Documents(vec![
            doc! { "_id": "Fiction", "avgPrice": 10.5 },
            doc! { "_id": "Fantasy", "avgPrice": 14.0 },
        ]);
        assert_eq!(
            formatter.format(&data).unwrap(),
            r#"[{"_id":"Fiction","avgPrice":10.5},{"_id":"Fantasy","avgPrice":14.0}]"#
        );
    }

    #[test]
    fn test_json_formatter_write_results() {
        let formatter = JsonFormatter::new(false, false, 2);
        assert_eq!(
            formatter
                .format(&ResultData::Update { matched: 1, modified: 0 })
                .unwrap(),
            r#"{"matchedCount":1,"modifiedCount":0}"#
        );
        assert_eq!(
            formatter.format(&ResultData::Delete { deleted: 1 }).unwrap(),
            r#"{"deletedCount":1}"#
        );
        assert_eq!(
            formatter
                .format(&ResultData::IndexCreated { name: "title_1".to_string() })
                .unwrap(),
            r#""title_1""#
        );
    }

    #[test]
    fn test_json_formatter_custom_indent() {
        let formatter = JsonFormatter::new(true, false, 4);
        let result = formatter.format_document(&doc! { "a": 1 }).unwrap();
        assert_eq!(result, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_json_formatter_compact_is_never_colored() {
        let formatter = JsonFormatter::new(false, true, 2);
        let result = formatter.format_document(&doc! { "a": 1 }).unwrap();
        assert!(!result.contains("\x1b"));
    }
}
