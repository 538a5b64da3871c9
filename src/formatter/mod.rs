//! Output formatting for step results
//!
//! - `shell`: mongosh-style text (default)
//! - `json`: compact or pretty JSON with simplified BSON types
//! - `table`: tabled grid, one row per document
//! - `compact`: one-line summaries
//!
//! Each step prints a header line with its label, then the rendered result,
//! then an optional statistics line.

pub mod bson_utils;
pub mod colorizer;
pub mod json;
pub mod shell;
pub mod stats;
pub mod table;

use colorizer::Colorizer;
use json::JsonFormatter;
use shell::ShellFormatter;
use stats::StatsFormatter;
use table::TableFormatter;

use mongodb::bson::{Document, doc};

use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;
use crate::executor::{ExecutionResult, ResultData};

/// Main formatter for step results
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Colorizer for headers and statistics
    colorizer: Colorizer,

    /// Enable colored output
    use_colors: bool,

    /// Indentation width for shell and pretty JSON output
    indent: usize,

    stats: StatsFormatter,
}

impl Formatter {
    /// Create a formatter from display settings
    ///
    /// # Arguments
    /// * `display` - Display configuration (format, colors, timing, indent)
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            format_type: display.format,
            colorizer: Colorizer::new(display.color_output),
            use_colors: display.color_output,
            indent: display.indent,
            stats: StatsFormatter::new(display.show_timing),
        }
    }

    /// Render one step: header, result and optional statistics
    ///
    /// # Arguments
    /// * `label` - Step label
    /// * `result` - Step result
    ///
    /// # Returns
    /// * `Result<String>` - Text ready to print
    pub fn format_step(&self, label: &str, result: &ExecutionResult) -> Result<String> {
        let mut output = format!("{}\n{}", self.header(label, &result.data), self.format(result)?);

        let stats = self.stats.format(result);
        if !stats.is_empty() {
            output.push('\n');
            output.push_str(&self.colorizer.dim(&stats));
        }

        Ok(output)
    }

    /// Header line for a step; reads end with a colon since data follows
    pub fn header(&self, label: &str, data: &ResultData) -> String {
        match data {
            ResultData::Documents(_) | ResultData::Document(_) => {
                self.colorizer.header(&format!("{}:", label))
            }
            _ => self.colorizer.header(label),
        }
    }

    /// Format a result according to the configured format
    pub fn format(&self, result: &ExecutionResult) -> Result<String> {
        match self.format_type {
            OutputFormat::Shell => Ok(self.format_shell(&result.data)),
            OutputFormat::Json => {
                JsonFormatter::new(false, self.use_colors, self.indent).format(&result.data)
            }
            OutputFormat::JsonPretty => {
                JsonFormatter::new(true, self.use_colors, self.indent).format(&result.data)
            }
            OutputFormat::Table => TableFormatter::new(self.use_colors).format(&result.data),
            OutputFormat::Compact => Ok(self.format_compact(result)),
        }
    }

    fn format_shell(&self, data: &ResultData) -> String {
        let shell = ShellFormatter::new(self.use_colors, self.indent);
        match data {
            ResultData::Documents(docs) => shell.format_documents(docs),
            ResultData::Document(doc) => shell.format_document(doc),
            ResultData::Update { matched, modified } => shell.format_document(
                &doc! {
                    "matchedCount": *matched as i64,
                    "modifiedCount": *modified as i64,
                },
            ),
            ResultData::Delete { deleted } => shell
                .format_document(&doc! { "deletedCount": *deleted as i64 }),
            ResultData::IndexCreated { name } => self.colorizer.string(name),
        }
    }

    /// One-line summary of a result
    pub fn format_compact(&self, result: &ExecutionResult) -> String {
        match &result.data {
            ResultData::Documents(docs) => format!("{} document(s) returned", docs.len()),
            ResultData::Document(doc) => format!("1 document ({} field(s))", doc.len()),
            ResultData::Update { matched, modified } => {
                format!("Matched: {}, modified: {}", matched, modified)
            }
            ResultData::Delete { deleted } => format!("Deleted: {}", deleted),
            ResultData::IndexCreated { name } => format!("Index: {}", name),
        }
    }

    /// Render a command document; JSON formats print JSON, all others shell style
    pub fn format_command(&self, command: &Document) -> Result<String> {
        if self.format_type.is_json() {
            let pretty = self.format_type == OutputFormat::JsonPretty;
            JsonFormatter::new(pretty, self.use_colors, self.indent).format_document(command)
        } else {
            Ok(ShellFormatter::new(self.use_colors, self.indent).format_document(command))
        }
    }
}
