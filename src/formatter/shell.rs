//! Shell-style formatting for MongoDB documents
//!
//! Mirrors how mongosh prints values: unquoted keys, single-quoted strings
//! and type wrappers such as `ObjectId('...')`, `Long('...')` or `ISODate('...')`.

use mongodb::bson::{Bson, Document};

use super::bson_utils::{binary_subtype_to_u8, binary_to_hex, datetime_to_iso_string};
use super::colorizer::Colorizer;

/// Shell-style formatter (mongosh compatible)
pub struct ShellFormatter {
    /// Colorizer for output highlighting
    colorizer: Colorizer,

    /// Spaces per nesting level
    indent: usize,
}

impl ShellFormatter {
    /// Create a new shell formatter
    ///
    /// # Arguments
    /// * `use_colors` - Enable colored output
    /// * `indent` - Spaces per nesting level
    pub fn new(use_colors: bool, indent: usize) -> Self {
        Self {
            colorizer: Colorizer::new(use_colors),
            indent,
        }
    }

    /// Format a BSON document in shell style
    pub fn format_document(&self, doc: &Document) -> String {
        self.format_document_with_indent(doc, 0)
    }

    /// Format a result set as a shell array, one document per element
    pub fn format_documents(&self, docs: &[Document]) -> String {
        let values: Vec<Bson> = docs.iter().cloned().map(Bson::Document).collect();
        self.format_array(&values, 0)
    }

    fn format_document_with_indent(&self, doc: &Document, indent_level: usize) -> String {
        if doc.is_empty() {
            return "{}".to_string();
        }

        let indent = " ".repeat((indent_level + 1) * self.indent);
        let entries: Vec<String> = doc
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}{}: {}",
                    indent,
                    self.colorizer.field_key(key),
                    self.format_bson_value(value, indent_level + 1)
                )
            })
            .collect();

        format!(
            "{{\n{}\n{}}}",
            entries.join(",\n"),
            " ".repeat(indent_level * self.indent)
        )
    }

    fn format_array(&self, arr: &[Bson], indent_level: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        let indent = " ".repeat((indent_level + 1) * self.indent);
        let items: Vec<String> = arr
            .iter()
            .map(|value| {
                format!(
                    "{}{}",
                    indent,
                    self.format_bson_value(value, indent_level + 1)
                )
            })
            .collect();

        format!(
            "[\n{}\n{}]",
            items.join(",\n"),
            " ".repeat(indent_level * self.indent)
        )
    }

    fn format_bson_value(&self, value: &Bson, indent_level: usize) -> String {
        match value {
            Bson::ObjectId(oid) => self.colorizer.type_wrapper("ObjectId", &oid.to_string()),
            Bson::DateTime(dt) => self.colorizer.iso_date(&datetime_to_iso_string(dt)),
            Bson::Int64(n) => self.colorizer.type_wrapper("Long", &n.to_string()),
            Bson::Decimal128(d) => self.colorizer.type_wrapper("Decimal128", &d.to_string()),
            Bson::String(s) => self.colorizer.string(s),
            Bson::Int32(n) => self.colorizer.number(&n.to_string()),
            Bson::Double(f) => self.colorizer.number(&f.to_string()),
            Bson::Boolean(b) => self.colorizer.number(&b.to_string()),
            Bson::Null => self.colorizer.null("null"),
            Bson::Undefined => self.colorizer.null("undefined"),
            Bson::Array(arr) => self.format_array(arr, indent_level),
            Bson::Document(doc) => self.format_document_with_indent(doc, indent_level),
            Bson::Binary(bin) => self
                .colorizer
                .bin_data(binary_subtype_to_u8(bin.subtype), &binary_to_hex(bin)),
            Bson::RegularExpression(regex) => self.colorizer.regex(&regex.pattern, &regex.options),
            Bson::Timestamp(ts) => self.colorizer.timestamp(ts.time, ts.increment),
            Bson::MinKey => "MinKey()".to_string(),
            Bson::MaxKey => "MaxKey()".to_string(),
            _ => format!("{:?}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn plain() -> ShellFormatter {
        ShellFormatter::new(false, 2)
    }

    #[test]
    fn test_shell_formatter_objectid() {
        use mongodb::bson::oid::ObjectId;
        let oid = ObjectId::parse_str("65705d84dfc3f3b5094e1f72").unwrap();
        let result = plain().format_document(&doc! { "_id": oid });
        assert!(result.contains("_id: ObjectId('65705d84dfc3f3b5094e1f72')"));
    }

    #[test]
    fn test_shell_formatter_book() {
        let doc = doc! {
            "title": "The Hobbit",
            "published_year": 1937,
            "price": 16.99,
            "in_stock": true,
        };
        let expected = "{\n  title: 'The Hobbit',\n  published_year: 1937,\n  price: 16.99,\n  in_stock: true\n}";
        assert_eq!(plain().format_document(&doc), expected);
    }

    #[test]
    fn test_shell_formatter_long_and_date() {
        use mongodb::bson::DateTime;
        let doc = doc! { "count": 1i64, "at": DateTime::from_millis(1701862788373) };
        let result = plain().format_document(&doc);
        assert!(result.contains("count: Long('1')"));
        assert!(result.contains("at: ISODate('2023-12-06"));
    }

    #[test]
    fn test_shell_formatter_nested() {
        let doc = doc! { "queryPlanner": { "winningPlan": { "stage": "COLLSCAN" } } };
        let result = plain().format_document(&doc);
        assert!(result.contains("    winningPlan: {\n      stage: 'COLLSCAN'\n    }"));
    }

    #[test]
    fn test_shell_formatter_binary() {
        use mongodb::bson::{Binary, spec::BinarySubtype};
        let bin = Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![0xde, 0xad],
        };
        let result = plain().format_document(&doc! { "raw": bin });
        assert!(result.contains("raw: BinData(0, 'dead')"));
    }

    #[test]
    fn test_format_documents_as_array() {
        let docs = vec![doc! { "_id": "Fiction" }, doc! { "_id": "Fantasy" }];
        assert_eq!(
            plain().format_documents(&docs),
            "[\n  {\n    _id: 'Fiction'\n  },\n  {\n    _id: 'Fantasy'\n  }\n]"
        );
    }

    #[test]
    fn test_format_documents_empty() {
        assert_eq!(plain().format_documents(&[]), "[]");
    }

    #[test]
    fn test_custom_indent() {
        let formatter = ShellFormatter::new(false, 4);
        assert_eq!(formatter.format_document(&doc! { "a": 1 }), "{\n    a: 1\n}");
    }
}
