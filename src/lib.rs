//! # toml_tree
//!
//! A document object model for TOML: parse text into an ordered, mutable tree,
//! read and edit it, and write it back out as TOML or JSON.
//!
//! ## Key Features
//!
//! - **Located errors**: every [`ParseError`] carries the `[begin, end)` line/column
//!   region of the offending token
//! - **Order preserving**: tables keep insertion order, and the formatters emit it
//! - **Lossless integers**: hexadecimal, octal and binary literals remember their base
//! - **Two formatters**: [`TomlFormatter`] and [`JsonFormatter`], tuned with [`FormatOptions`]
//! - **Serde compatible**: convert between trees and your own types with
//!   `#[derive(Serialize, Deserialize)]`
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_tree::{parse, Node};
//!
//! let mut doc = parse("a = 1\n[b]\nc = 2\n").unwrap();
//! assert_eq!(doc.len(), 2);
//! assert!(!doc.is_homogeneous());
//!
//! let b = doc.get_mut("b").and_then(Node::as_table_mut).unwrap();
//! b.insert("d", "new").unwrap();
//!
//! assert_eq!(doc.to_toml(), "a = 1\n\n[b]\nc = 2\nd = \"new\"\n");
//! assert_eq!(doc.to_json_with_options(toml_tree::FormatOptions::compact()),
//!            r#"{"a":1,"b":{"c":2,"d":"new"}}"#);
//! ```
//!
//! ### Errors
//!
//! Parsing stops at the first problem:
//!
//! ```rust
//! use toml_tree::parse;
//!
//! let err = parse("name = \"unterminated\n").unwrap_err();
//! assert_eq!(err.region().begin.line, 1);
//! assert_eq!(err.region().begin.column, 8);
//! println!("{}", err); // unterminated string (from line 1, column 8 to line 1, column 21)
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toml_tree::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Package {
//!     name: String,
//!     version: String,
//!     keywords: Vec<String>,
//! }
//!
//! let package = Package {
//!     name: "demo".to_string(),
//!     version: "0.1.0".to_string(),
//!     keywords: vec!["toml".to_string()],
//! };
//!
//! let text = to_string(&package).unwrap();
//! assert_eq!(text, "name = \"demo\"\nversion = \"0.1.0\"\nkeywords = [ \"toml\" ]\n");
//! assert_eq!(from_str::<Package>(&text).unwrap(), package);
//! ```
//!
//! ## Threading
//!
//! Trees are plain owned data (`Send + Sync`) with no interior mutability. Share
//! one across threads behind your own lock, or clone it.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: `debug` once per
//! parsed document and `trace` for table headers and formatter runs. Nothing is
//! emitted unless the application installs a logger.

pub mod array;
pub mod datetime;
pub mod de;
pub mod error;
pub mod format;
pub mod json;
pub mod macros;
pub mod options;
mod parser;
pub mod ser;
pub mod table;
pub mod value;

pub use array::Array;
pub use datetime::{Date, DateTime, Time};
pub use de::{from_node, from_table, NodeDeserializer};
pub use error::{Error, ParseError, Result, SourcePosition, SourceRegion};
pub use format::TomlFormatter;
pub use json::JsonFormatter;
pub use options::FormatOptions;
pub use ser::{to_node, NodeSerializer};
pub use table::Table;
pub use value::{Integer, IntegerBase, Node, NodeType};

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Parses a TOML document into its root [`Table`].
///
/// Each call is independent; no state is kept between calls.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{parse, Node};
///
/// let table = parse("[[fruit]]\nname = 'apple'\n[[fruit]]\nname = 'pear'").unwrap();
/// let fruit = table.get("fruit").and_then(Node::as_array).unwrap();
/// assert_eq!(fruit.len(), 2);
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax or redefinition error and
/// where it occurred.
pub fn parse(input: &str) -> std::result::Result<Table, ParseError> {
    parser::parse_document(input)
}

/// Formats `table` as a TOML document with default options.
#[must_use]
pub fn to_toml_string(table: &Table) -> String {
    to_toml_string_with_options(table, FormatOptions::default())
}

/// Formats `table` as a TOML document.
#[must_use]
pub fn to_toml_string_with_options(table: &Table, options: FormatOptions) -> String {
    let mut formatter = TomlFormatter::new(options);
    formatter.write_table(table);
    formatter.into_inner()
}

/// Formats `table` as a JSON object with default options.
#[must_use]
pub fn to_json_string(table: &Table) -> String {
    to_json_string_with_options(table, FormatOptions::default())
}

/// Formats `table` as a JSON object.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{parse, to_json_string_with_options, FormatOptions};
///
/// let table = parse("mask = 0xff").unwrap();
/// assert_eq!(to_json_string_with_options(&table, FormatOptions::compact()), r#"{"mask":255}"#);
/// ```
#[must_use]
pub fn to_json_string_with_options(table: &Table, options: FormatOptions) -> String {
    let mut formatter = JsonFormatter::new(options);
    formatter.write_table(table);
    formatter.into_inner()
}

/// Converts any `T: Serialize` into a [`Table`].
///
/// # Errors
///
/// Returns an error if the value cannot be represented in TOML or does not
/// serialize to a table (a bare integer, for example).
pub fn to_table<T>(value: &T) -> Result<Table>
where
    T: ?Sized + Serialize,
{
    match to_node(value)? {
        Node::Table(table) => Ok(table),
        other => Err(Error::type_mismatch("table", other.node_type().name())),
    }
}

/// Serializes any `T: Serialize` to a TOML document.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a TOML document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, FormatOptions::default())
}

/// Serializes any `T: Serialize` to a TOML document with custom options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toml_tree::{to_string_with_options, FormatOptions};
///
/// #[derive(Serialize)]
/// struct Paths { home: String }
///
/// let options = FormatOptions::new().with_literal_strings(true);
/// let toml = to_string_with_options(&Paths { home: r"C:\Users".into() }, options).unwrap();
/// assert_eq!(toml, "home = 'C:\\Users'\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a TOML document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: FormatOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_toml_string_with_options(&to_table(value)?, options))
}

/// Serializes any `T: Serialize` as a TOML document into a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let toml = to_string(value)?;
    writer
        .write_all(toml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of `T` from TOML text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toml_tree::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed TOML, or a deserialization error if the
/// document's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_table(parse(s)?)
}

/// Deserializes an instance of `T` from UTF-8 encoded TOML bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, are not valid TOML, or do
/// not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserializes an instance of `T` from an I/O stream of TOML.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use std::io::Cursor;
/// use toml_tree::from_reader;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid TOML, or it does not
/// match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        home: Option<Point>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            home: Some(Point { x: 1, y: 2 }),
        }
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let toml = to_string(&user()).unwrap();
        assert_eq!(
            toml,
            "id = 123\nname = \"Alice\"\nactive = true\ntags = [ \"admin\", \"user\" ]\n\n[home]\nx = 1\ny = 2\n"
        );
        assert_eq!(from_str::<User>(&toml).unwrap(), user());
    }

    #[test]
    fn test_missing_option_round_trip() {
        let mut user = user();
        user.home = None;
        let toml = to_string(&user).unwrap();
        assert!(!toml.contains("home"));
        assert_eq!(from_str::<User>(&toml).unwrap(), user);
    }

    #[test]
    fn test_top_level_must_be_table() {
        assert_eq!(
            to_string(&vec![1, 2]),
            Err(Error::type_mismatch("table", "array"))
        );
    }

    #[test]
    fn test_parse_error_surfaces_through_from_str() {
        match from_str::<Point>("x = ") {
            Err(Error::Parse(err)) => assert_eq!(err.region().begin.column, 4),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_writer_and_slice() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &Point { x: 3, y: 4 }).unwrap();
        assert_eq!(from_slice::<Point>(&buffer).unwrap(), Point { x: 3, y: 4 });
        assert!(from_slice::<Point>(&[0xff, 0xfe]).is_err());
    }
}
