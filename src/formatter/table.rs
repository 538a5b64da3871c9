//! Table formatting for result sets using tabled
//!
//! Columns are the union of keys across all documents in the order they are
//! first seen, with `_id` first. Nested values are summarized so a row stays on one line; long
//! cells wrap at the column width.

use std::collections::HashSet;

use mongodb::bson::{Bson, Document, doc};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Modify, Style, object::Columns, object::Rows, width::Width},
};

use super::bson_utils::{binary_to_hex, datetime_to_iso_string, format_double_smart};
use crate::error::Result;
use crate::executor::ResultData;

/// Maximum width for a single column (characters)
const DEFAULT_MAX_COLUMN_WIDTH: usize = 40;

/// Nested arrays/documents up to this size are shown inline
const INLINE_LIMIT: usize = 3;

/// Table formatter for document collections
pub struct TableFormatter {
    /// Maximum column width
    max_column_width: usize,

    /// Enable colored header
    use_colors: bool,
}

impl TableFormatter {
    /// Create a new table formatter
    ///
    /// # Arguments
    /// * `use_colors` - Enable colored header row
    pub fn new(use_colors: bool) -> Self {
        Self {
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            use_colors,
        }
    }

    /// Format result data as table
    ///
    /// Write results become a single-row table of their counts.
    pub fn format(&self, data: &ResultData) -> Result<String> {
        match data {
            ResultData::Documents(docs) if docs.is_empty() => Ok("(empty result set)".to_string()),
            ResultData::Documents(docs) => Ok(self.format_documents(docs)),
            ResultData::Document(doc) => Ok(self.format_documents(std::slice::from_ref(doc))),
            ResultData::Update { matched, modified } => Ok(self.format_documents(&[doc! {
                "matchedCount": *matched as i64,
                "modifiedCount": *modified as i64,
            }])),
            ResultData::Delete { deleted } => {
                Ok(self.format_documents(&[doc! { "deletedCount": *deleted as i64 }]))
            }
            ResultData::IndexCreated { name } => {
                Ok(self.format_documents(&[doc! { "index": name.as_str() }]))
            }
        }
    }

    fn format_documents(&self, docs: &[Document]) -> String {
        let fields = extract_field_names(docs);
        if fields.is_empty() {
            return "(no fields found)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(fields.clone());
        for doc in docs {
            let row: Vec<String> = fields
                .iter()
                .map(|field| doc.get(field).map(format_cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.with(Modify::new(Columns::new(..)).with(Width::wrap(self.max_column_width)));
        table.with(Modify::new(Rows::first()).with(Alignment::center()));

        if self.use_colors {
            table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
        }

        table.to_string()
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Unique field names across documents in first-seen order, with `_id` first
fn extract_field_names(docs: &[Document]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = docs
        .iter()
        .flat_map(|doc| doc.keys())
        .filter(|key| seen.insert(*key))
        .cloned()
        .collect();
    if let Some(pos) = names.iter().position(|f| f == "_id") {
        let id = names.remove(pos);
        names.insert(0, id);
    }
    names
}

/// One-line rendering of a value for a table cell
fn format_cell(value: &Bson) -> String {
    match value {
        Bson::ObjectId(oid) => format!("ObjectId('{}')", oid),
        Bson::DateTime(dt) => format!("ISODate('{}')", datetime_to_iso_string(dt)),
        Bson::Int64(n) => n.to_string(),
        Bson::Decimal128(d) => d.to_string(),
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Double(f) => format_double_smart(*f),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => "null".to_string(),
        Bson::Array(arr) if arr.is_empty() => "[]".to_string(),
        Bson::Array(arr) if arr.len() <= INLINE_LIMIT => {
            let items: Vec<String> = arr.iter().map(format_cell).collect();
            format!("[{}]", items.join(", "))
        }
        Bson::Array(arr) => format!("[Array({})]", arr.len()),
        Bson::Document(doc) if doc.is_empty() => "{}".to_string(),
        Bson::Document(doc) if doc.len() <= INLINE_LIMIT => {
            let fields: Vec<String> = doc
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_cell(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        Bson::Document(doc) => format!("{{Object({})}}", doc.len()),
        Bson::Binary(bin) => {
            let hex = binary_to_hex(bin);
            if hex.len() > 16 {
                format!("Binary({}...)", &hex[..16])
            } else {
                format!("Binary({})", hex)
            }
        }
        Bson::RegularExpression(regex) => format!("/{}/{}", regex.pattern, regex.options),
        Bson::Timestamp(ts) => format!("Timestamp({}, {})", ts.time, ts.increment),
        _ => format!("{:?}", value),
    }
}
