//! TOML formatting.
//!
//! [`TomlFormatter`] writes a [`Table`] tree back out as TOML text. Output is
//! deterministic and keeps insertion order. Within each table, plain key/value
//! lines come first, then `[sub.tables]`, then `[[arrays.of.tables]]`. Headers for
//! tables that only contain other sections are left implicit.
//!
//! ```rust
//! use toml_tree::{parse, TomlFormatter, FormatOptions};
//!
//! let table = parse("title = 'TOML'\n[owner]\nname = 'Tom'").unwrap();
//!
//! let mut formatter = TomlFormatter::new(FormatOptions::default());
//! formatter.write_table(&table);
//! assert_eq!(formatter.into_inner(), "title = \"TOML\"\n\n[owner]\nname = \"Tom\"\n");
//! ```

use crate::{Array, FormatOptions, Integer, IntegerBase, Node, Table};

/// Arrays whose single-line form would be wider than this are wrapped when
/// [`FormatOptions::indent_array_elements`] is set.
const MAX_ARRAY_WIDTH: usize = 120;

/// Writes TOML documents and values into an internal buffer.
pub struct TomlFormatter {
    output: String,
    options: FormatOptions,
}

impl TomlFormatter {
    pub fn new(options: FormatOptions) -> Self {
        TomlFormatter {
            output: String::with_capacity(256),
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `table` as a complete document. The table's own inline flag is
    /// ignored; nested tables honour theirs.
    pub fn write_table(&mut self, table: &Table) {
        log::trace!("formatting TOML document with {} top-level keys", table.len());
        let mut path = Vec::new();
        self.write_section(table, &mut path, false);
    }

    /// Writes `array` as an inline value.
    pub fn write_array(&mut self, array: &Array) {
        self.write_inline_array(array, 0, true);
    }

    /// Writes a non-inline table as a document and anything else as an inline
    /// value.
    pub fn write_node(&mut self, node: &Node) {
        match node {
            Node::Table(table) if !table.is_inline() => self.write_table(table),
            other => self.write_value(other, 0, true),
        }
    }

    fn write_section(&mut self, table: &Table, path: &mut Vec<String>, array_element: bool) {
        let width = match path.len() {
            0 => 0,
            depth if self.options.indent_sub_tables => (depth - 1) * self.options.indent,
            _ => 0,
        };
        let has_values = table.values().any(|v| !is_section(v));

        if !path.is_empty() && (array_element || has_values || table.is_empty()) {
            if !self.output.is_empty() {
                self.output.push('\n');
            }
            self.push_indent(width);
            let name = path.join(".");
            if array_element {
                self.output.push_str("[[");
                self.output.push_str(&name);
                self.output.push_str("]]\n");
            } else {
                self.output.push('[');
                self.output.push_str(&name);
                self.output.push_str("]\n");
            }
        }

        for (key, value) in table.iter().filter(|(_, v)| !is_section(v)) {
            self.push_indent(width);
            self.write_key(key);
            self.output.push_str(" = ");
            self.write_value(value, width, true);
            self.output.push('\n');
        }

        for (key, value) in table.iter() {
            if let Node::Table(child) = value {
                if !child.is_inline() {
                    path.push(format_key(key));
                    self.write_section(child, path, false);
                    path.pop();
                }
            }
        }

        for (key, value) in table.iter() {
            if let Node::Array(array) = value {
                if is_array_of_tables(array) {
                    path.push(format_key(key));
                    for element in array.iter().filter_map(Node::as_table) {
                        self.write_section(element, path, true);
                    }
                    path.pop();
                }
            }
        }
    }

    fn push_indent(&mut self, width: usize) {
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn write_key(&mut self, key: &str) {
        let formatted = format_key(key);
        self.output.push_str(&formatted);
    }

    fn write_value(&mut self, node: &Node, width: usize, may_wrap: bool) {
        match node {
            Node::Table(table) => self.write_inline_table(table),
            Node::Array(array) => self.write_inline_array(array, width, may_wrap),
            Node::String(s) => self.write_string(s),
            Node::Integer(integer) => self.write_integer(integer),
            Node::Float(f) => self.write_float(*f),
            Node::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Node::Date(date) => self.write_temporal(&date.to_string()),
            Node::Time(time) => self.write_temporal(&time.to_string()),
            Node::DateTime(dt) => self.write_temporal(&dt.to_string()),
        }
    }

    fn write_inline_table(&mut self, table: &Table) {
        if table.is_empty() {
            self.output.push_str("{}");
            return;
        }
        self.output.push_str("{ ");
        for (i, (key, value)) in table.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_key(key);
            self.output.push_str(" = ");
            // Inline tables stay on one line
            self.write_value(value, 0, false);
        }
        self.output.push_str(" }");
    }

    fn write_inline_array(&mut self, array: &Array, width: usize, may_wrap: bool) {
        if array.is_empty() {
            self.output.push_str("[]");
            return;
        }

        let mut single_line = TomlFormatter::new(self.options.clone());
        single_line.output.push_str("[ ");
        for (i, element) in array.iter().enumerate() {
            if i > 0 {
                single_line.output.push_str(", ");
            }
            single_line.write_value(element, 0, false);
        }
        single_line.output.push_str(" ]");

        let wrap = may_wrap
            && self.options.indent_array_elements
            && width + single_line.output.len() > MAX_ARRAY_WIDTH;
        if !wrap {
            self.output.push_str(&single_line.output);
            return;
        }

        let inner = width + self.options.indent;
        self.output.push_str("[\n");
        for element in array.iter() {
            self.push_indent(inner);
            self.write_value(element, inner, true);
            self.output.push_str(",\n");
        }
        self.push_indent(width);
        self.output.push(']');
    }

    fn write_string(&mut self, s: &str) {
        let options = &self.options;
        if options.allow_literal_strings && needs_escaping(s) && can_be_literal(s) {
            self.output.push('\'');
            self.output.push_str(s);
            self.output.push('\'');
        } else if options.allow_multiline_strings && s.contains('\n') {
            self.output.push_str("\"\"\"\n");
            self.write_escaped(s, true);
            self.output.push_str("\"\"\"");
        } else {
            self.output.push('"');
            self.write_escaped(s, false);
            self.output.push('"');
        }
    }

    fn write_escaped(&mut self, s: &str, multiline: bool) {
        let real_tabs = self.options.allow_real_tabs_in_strings;
        escape_into(&mut self.output, s, multiline, real_tabs);
    }

    fn write_integer(&mut self, integer: &Integer) {
        let allowed = match integer.base() {
            IntegerBase::Decimal => true,
            IntegerBase::Binary => self.options.allow_binary_integers,
            IntegerBase::Octal => self.options.allow_octal_integers,
            IntegerBase::Hexadecimal => self.options.allow_hexadecimal_integers,
        };
        if allowed {
            self.output.push_str(&integer.to_string());
        } else {
            self.output.push_str(&integer.value().to_string());
        }
    }

    fn write_float(&mut self, f: f64) {
        let special = if f.is_nan() {
            "nan"
        } else if f == f64::INFINITY {
            "inf"
        } else if f == f64::NEG_INFINITY {
            "-inf"
        } else {
            // Debug always keeps a fraction or exponent, so the value reads back as a float
            self.output.push_str(&format!("{:?}", f));
            return;
        };
        if self.options.quote_infinities_and_nans {
            self.output.push('"');
            self.output.push_str(special);
            self.output.push('"');
        } else {
            self.output.push_str(special);
        }
    }

    fn write_temporal(&mut self, text: &str) {
        if self.options.quote_dates_and_times {
            self.output.push('"');
            self.output.push_str(text);
            self.output.push('"');
        } else {
            self.output.push_str(text);
        }
    }
}

/// Tables and arrays of tables get their own `[header]` blocks.
fn is_section(node: &Node) -> bool {
    match node {
        Node::Table(table) => !table.is_inline(),
        Node::Array(array) => is_array_of_tables(array),
        _ => false,
    }
}

fn is_array_of_tables(array: &Array) -> bool {
    !array.is_empty()
        && array
            .iter()
            .all(|n| matches!(n, Node::Table(table) if !table.is_inline()))
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn format_key(key: &str) -> String {
    if is_bare_key(key) {
        return key.to_string();
    }
    let mut quoted = String::with_capacity(key.len() + 2);
    quoted.push('"');
    escape_into(&mut quoted, key, false, false);
    quoted.push('"');
    quoted
}

fn needs_escaping(s: &str) -> bool {
    s.contains(|c| c == '\\' || c == '"')
}

fn can_be_literal(s: &str) -> bool {
    !s.contains(|c: char| c == '\'' || (c.is_control() && c != '\t'))
}

fn escape_into(out: &mut String, s: &str, multiline: bool, real_tabs: bool) {
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' if multiline => out.push('\n'),
            '\n' => out.push_str("\\n"),
            '\t' if real_tabs => out.push('\t'),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c < ' ' || c == '\u{7f}' => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
}
