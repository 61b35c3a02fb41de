//! JSON formatting.
//!
//! [`JsonFormatter`] writes the same tree as JSON. JSON has fewer types than TOML,
//! so some information is flattened:
//!
//! | TOML | JSON |
//! |------|------|
//! | integer (any base) | decimal number |
//! | date, time, date-time | RFC 3339 string |
//! | `inf`, `nan` | `null`, or a string with [`FormatOptions::quote_infinities_and_nans`] |
//!
//! ```rust
//! use toml_tree::{parse, FormatOptions};
//!
//! let table = parse("mask = 0xff\nborn = 1979-05-27").unwrap();
//! assert_eq!(
//!     table.to_json_with_options(FormatOptions::compact()),
//!     r#"{"mask":255,"born":"1979-05-27"}"#
//! );
//! ```

use crate::{Array, FormatOptions, Node, Table};

/// Writes JSON objects and values into an internal buffer.
///
/// Objects are pretty-printed when [`FormatOptions::indent_sub_tables`] is set;
/// arrays put one element per line when [`FormatOptions::indent_array_elements`]
/// is set.
pub struct JsonFormatter {
    output: String,
    options: FormatOptions,
    indent_level: usize,
}

impl JsonFormatter {
    pub fn new(options: FormatOptions) -> Self {
        JsonFormatter {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    pub fn write_table(&mut self, table: &Table) {
        log::trace!("formatting JSON object with {} top-level keys", table.len());
        self.write_object(table);
    }

    pub fn write_array(&mut self, array: &Array) {
        let pretty = self.options.indent_array_elements;
        self.write_list(array, pretty);
    }

    pub fn write_node(&mut self, node: &Node) {
        match node {
            Node::Table(table) => self.write_object(table),
            Node::Array(array) => self.write_array(array),
            Node::String(s) => self.write_string(s),
            Node::Integer(integer) => self.output.push_str(&integer.value().to_string()),
            Node::Float(f) => self.write_float(*f),
            Node::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Node::Date(date) => self.write_string(&date.to_string()),
            Node::Time(time) => self.write_string(&time.to_string()),
            Node::DateTime(dt) => self.write_string(&dt.to_string()),
        }
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
        let width = self.indent_level * self.options.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn write_object(&mut self, table: &Table) {
        if table.is_empty() {
            self.output.push_str("{}");
            return;
        }
        let pretty = self.options.indent_sub_tables;

        self.output.push('{');
        self.indent_level += 1;
        for (i, (key, value)) in table.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            if pretty {
                self.write_newline();
            }
            self.write_string(key);
            self.output.push_str(if pretty { ": " } else { ":" });
            self.write_node(value);
        }
        self.indent_level -= 1;
        if pretty {
            self.write_newline();
        }
        self.output.push('}');
    }

    fn write_list(&mut self, array: &Array, pretty: bool) {
        if array.is_empty() {
            self.output.push_str("[]");
            return;
        }

        self.output.push('[');
        self.indent_level += 1;
        for (i, element) in array.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            if pretty {
                self.write_newline();
            }
            self.write_node(element);
        }
        self.indent_level -= 1;
        if pretty {
            self.write_newline();
        }
        self.output.push(']');
    }

    fn write_float(&mut self, f: f64) {
        if f.is_finite() {
            self.output.push_str(&format!("{:?}", f));
            return;
        }
        if !self.options.quote_infinities_and_nans {
            self.output.push_str("null");
            return;
        }
        let text = if f.is_nan() {
            "nan"
        } else if f > 0.0 {
            "inf"
        } else {
            "-inf"
        };
        self.write_string(text);
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                c if c < ' ' => self.output.push_str(&format!("\\u{:04x}", c as u32)),
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }
}
