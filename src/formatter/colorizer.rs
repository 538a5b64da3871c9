//! Color output support for terminal formatting
//!
//! Every method returns plain text when colors are disabled, so callers never
//! branch on the color setting themselves.

/// ANSI color codes for terminal output
pub struct AnsiColors;

impl AnsiColors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const MAGENTA: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";

    pub const BRIGHT_BLACK: &'static str = "\x1b[90m";
}

/// Color scheme for output highlighting
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    /// Enable colors
    enabled: bool,
}

impl Colorizer {
    /// Create a new colorizer
    ///
    /// # Arguments
    /// * `enabled` - Enable color output
    ///
    /// # Returns
    /// * `Self` - New colorizer
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color, text, AnsiColors::RESET)
        } else {
            text.to_string()
        }
    }

    /// Step header (bold)
    pub fn header(&self, text: &str) -> String {
        self.paint(AnsiColors::BOLD, text)
    }

    /// Secondary information such as timings (dim)
    pub fn dim(&self, text: &str) -> String {
        self.paint(AnsiColors::BRIGHT_BLACK, text)
    }

    /// Document key; quoted when it is not a bare identifier
    pub fn field_key(&self, key: &str) -> String {
        if is_bare_key(key) {
            self.paint(AnsiColors::CYAN, key)
        } else {
            self.paint(AnsiColors::CYAN, &format!("'{}'", key))
        }
    }

    /// String value in single quotes (green)
    pub fn string(&self, text: &str) -> String {
        self.paint(AnsiColors::GREEN, &format!("'{}'", escape_string(text)))
    }

    /// Number or boolean (yellow)
    pub fn number(&self, text: &str) -> String {
        self.paint(AnsiColors::YELLOW, text)
    }

    pub fn null(&self, text: &str) -> String {
        self.paint(AnsiColors::BRIGHT_BLACK, text)
    }

    /// Typed wrapper such as `ObjectId('...')` or `Long('...')`
    pub fn type_wrapper(&self, type_name: &str, value: &str) -> String {
        if self.enabled {
            format!(
                "{}{}({}'{}'{}){}",
                AnsiColors::MAGENTA,
                type_name,
                AnsiColors::GREEN,
                value,
                AnsiColors::MAGENTA,
                AnsiColors::RESET
            )
        } else {
            format!("{}('{}')", type_name, value)
        }
    }

    pub fn iso_date(&self, iso: &str) -> String {
        self.type_wrapper("ISODate", iso)
    }

    pub fn bin_data(&self, subtype: u8, hex: &str) -> String {
        self.paint(AnsiColors::MAGENTA, &format!("BinData({}, '{}')", subtype, hex))
    }

    pub fn regex(&self, pattern: &str, options: &str) -> String {
        self.paint(AnsiColors::RED, &format!("/{}/{}", pattern, options))
    }

    pub fn timestamp(&self, time: u32, increment: u32) -> String {
        self.paint(
            AnsiColors::BLUE,
            &format!("Timestamp({{ t: {}, i: {} }})", time, increment),
        )
    }
}

/// Backslash-escape a string for a single-quoted literal
fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorizer_no_colors() {
        let colorizer = Colorizer::new(false);
        let result = colorizer.header("Fiction books:");
        assert_eq!(result, "Fiction books:");
        assert!(!result.contains("\x1b"));
    }

    #[test]
    fn test_colorizer_with_colors() {
        let colorizer = Colorizer::new(true);
        let result = colorizer.string("Room");
        assert!(result.starts_with(AnsiColors::GREEN));
        assert!(result.ends_with(AnsiColors::RESET));
        assert!(result.contains("'Room'"));
    }

    #[test]
    fn test_type_wrapper_plain() {
        let colorizer = Colorizer::new(false);
        assert_eq!(colorizer.type_wrapper("Long", "7"), "Long('7')");
        assert_eq!(
            colorizer.iso_date("2023-12-06T11:39:48.373Z"),
            "ISODate('2023-12-06T11:39:48.373Z')"
        );
    }

    #[test]
    fn test_field_key_quoting() {
        let colorizer = Colorizer::new(false);
        assert_eq!(colorizer.field_key("published_year"), "published_year");
        assert_eq!(colorizer.field_key("$group"), "$group");
        assert_eq!(colorizer.field_key("first name"), "'first name'");
        assert_eq!(colorizer.field_key("1st"), "'1st'");
    }

    #[test]
    fn test_string_escapes_quotes() {
        let colorizer = Colorizer::new(false);
        assert_eq!(colorizer.string("Harper's"), "'Harper\\'s'");
    }

    #[test]
    fn test_string_escapes_backslashes_and_control_chars() {
        let colorizer = Colorizer::new(false);
        assert_eq!(colorizer.string("a\\'b\nc"), r"'a\\\'b\nc'");
        assert_eq!(colorizer.string("tab\there"), r"'tab\there'");
        assert!(!colorizer.string("line\nbreak").contains('\n'));
    }
}
