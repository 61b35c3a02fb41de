//! Configuration options for the TOML and JSON formatters.
//!
//! [`FormatOptions`] is a set of independent switches. Start from the defaults and
//! flip what you need:
//!
//! ```rust
//! use toml_tree::{parse, FormatOptions};
//!
//! let table = parse("path = 'C:\\Users'\nwhen = 1979-05-27").unwrap();
//!
//! let options = FormatOptions::new()
//!     .with_literal_strings(true)
//!     .with_quoted_dates_and_times(true);
//! let toml = table.to_toml_with_options(options);
//! assert!(toml.contains("path = 'C:\\Users'"));
//! assert!(toml.contains("when = \"1979-05-27\""));
//! ```
//!
//! ## Defaults
//!
//! | Switch | Default |
//! |--------|---------|
//! | `quote_dates_and_times`, `quote_infinities_and_nans` | off |
//! | `allow_literal_strings`, `allow_multiline_strings` | **off** |
//! | `allow_real_tabs_in_strings` | off |
//! | `allow_binary_integers`, `allow_octal_integers`, `allow_hexadecimal_integers` | on |
//! | `indent_sub_tables`, `indent_array_elements` | on |
//! | `indent` | 2 |
//!
//! Literal and multi-line strings are opt-in, so the default output always
//! uses single-line `"basic"` strings with escapes. Call
//! [`FormatOptions::with_literal_strings`] and
//! [`FormatOptions::with_multiline_strings`] to get `'C:\path'` and `"""`
//! blocks instead.

/// Configuration for [`TomlFormatter`](crate::TomlFormatter) and
/// [`JsonFormatter`](crate::JsonFormatter).
///
/// # Examples
///
/// ```rust
/// use toml_tree::FormatOptions;
///
/// // Defaults: integer bases honoured, two-space indentation
/// let options = FormatOptions::new();
/// assert!(options.allow_hexadecimal_integers);
/// assert_eq!(options.indent, 2);
///
/// // No indentation at all
/// let options = FormatOptions::compact();
/// assert!(!options.indent_sub_tables);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Emit dates and times as quoted strings. JSON output always quotes them.
    pub quote_dates_and_times: bool,
    /// Emit `inf` and `nan` as quoted strings. Without it, JSON output writes `null`.
    pub quote_infinities_and_nans: bool,
    /// Emit `'literal'` strings when the content needs no escaping.
    pub allow_literal_strings: bool,
    /// Emit strings containing newlines as `"""` multi-line strings.
    pub allow_multiline_strings: bool,
    /// Write tab characters as-is instead of `\t`.
    pub allow_real_tabs_in_strings: bool,
    pub allow_binary_integers: bool,
    pub allow_octal_integers: bool,
    pub allow_hexadecimal_integers: bool,
    /// Indent nested `[a.b]` sections (TOML) and nested objects (JSON).
    pub indent_sub_tables: bool,
    /// Put one element per line when an array wraps.
    pub indent_array_elements: bool,
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            quote_dates_and_times: false,
            quote_infinities_and_nans: false,
            allow_literal_strings: false,
            allow_multiline_strings: false,
            allow_real_tabs_in_strings: false,
            allow_binary_integers: true,
            allow_octal_integers: true,
            allow_hexadecimal_integers: true,
            indent_sub_tables: true,
            indent_array_elements: true,
            indent: 2,
        }
    }
}

impl FormatOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with all indentation turned off.
    #[must_use]
    pub fn compact() -> Self {
        FormatOptions {
            indent_sub_tables: false,
            indent_array_elements: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_quoted_dates_and_times(mut self, yes: bool) -> Self {
        self.quote_dates_and_times = yes;
        self
    }

    #[must_use]
    pub fn with_quoted_infinities_and_nans(mut self, yes: bool) -> Self {
        self.quote_infinities_and_nans = yes;
        self
    }

    #[must_use]
    pub fn with_literal_strings(mut self, yes: bool) -> Self {
        self.allow_literal_strings = yes;
        self
    }

    #[must_use]
    pub fn with_multiline_strings(mut self, yes: bool) -> Self {
        self.allow_multiline_strings = yes;
        self
    }

    #[must_use]
    pub fn with_real_tabs_in_strings(mut self, yes: bool) -> Self {
        self.allow_real_tabs_in_strings = yes;
        self
    }

    /// Enables or disables all three prefixed integer bases at once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Integer, IntegerBase, Table, FormatOptions};
    ///
    /// let mut table = Table::new();
    /// table.insert("mask", Integer::with_base(255, IntegerBase::Hexadecimal)).unwrap();
    ///
    /// let toml = table.to_toml_with_options(FormatOptions::new().with_integer_bases(false));
    /// assert_eq!(toml.trim(), "mask = 255");
    /// ```
    #[must_use]
    pub fn with_integer_bases(mut self, yes: bool) -> Self {
        self.allow_binary_integers = yes;
        self.allow_octal_integers = yes;
        self.allow_hexadecimal_integers = yes;
        self
    }

    #[must_use]
    pub fn with_indented_sub_tables(mut self, yes: bool) -> Self {
        self.indent_sub_tables = yes;
        self
    }

    #[must_use]
    pub fn with_indented_array_elements(mut self, yes: bool) -> Self {
        self.indent_array_elements = yes;
        self
    }

    /// Sets the indentation width (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Table;

    #[test]
    fn test_string_styles_are_opt_in() {
        let options = FormatOptions::default();
        assert!(!options.allow_literal_strings);
        assert!(!options.allow_multiline_strings);

        let mut table = Table::new();
        table.insert("path", "C:\\Users").unwrap();
        table.insert("poem", "roses\nviolets\n").unwrap();
        assert_eq!(
            table.to_toml(),
            "path = \"C:\\\\Users\"\npoem = \"roses\\nviolets\\n\"\n"
        );

        let styled = table.to_toml_with_options(
            FormatOptions::new()
                .with_literal_strings(true)
                .with_multiline_strings(true),
        );
        assert!(styled.contains("path = 'C:\\Users'\n"));
        assert!(styled.contains("poem = \"\"\""));
    }
}
