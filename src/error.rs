//! Error types for parsing, editing, and (de)serializing TOML documents.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed TOML source, with a `[begin, end)` source region
//! - **Key conflicts**: [`Table::insert`](crate::Table::insert) on a key that already exists
//! - **Index errors**: [`Array`](crate::Array) mutations outside `0..len`
//! - **Type mismatches**: fallible conversions out of a [`Node`](crate::Node)
//! - **Serde errors**: unsupported Rust types and custom messages
//!
//! ## Source Positions
//!
//! Lines and columns are **1-based**. Columns count Unicode scalar values, not bytes.
//!
//! ```rust
//! use toml_tree::parse;
//!
//! let err = parse("key = \n").unwrap_err();
//! assert_eq!(err.region().begin.line, 1);
//! assert_eq!(err.region().begin.column, 6);
//! ```

use std::fmt;
use thiserror::Error;

/// A 1-based line/column position in a TOML document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        SourcePosition { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The half-open `[begin, end)` region of the source responsible for an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceRegion {
    pub begin: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRegion {
    #[must_use]
    pub const fn new(begin: SourcePosition, end: SourcePosition) -> Self {
        SourceRegion { begin, end }
    }

    /// An empty region at a single position.
    #[must_use]
    pub const fn at(position: SourcePosition) -> Self {
        SourceRegion {
            begin: position,
            end: position,
        }
    }
}

impl fmt::Display for SourceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "at {}", self.begin)
        } else {
            write!(f, "from {} to {}", self.begin, self.end)
        }
    }
}

/// An error produced while parsing a TOML document.
///
/// Parsing stops at the first error; there is no partial result.
///
/// # Examples
///
/// ```rust
/// use toml_tree::parse;
///
/// let err = parse("a = 1\na = 2\n").unwrap_err();
/// assert!(err.description().contains("duplicate key"));
/// assert_eq!(err.region().begin.line, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{description} ({region})")]
pub struct ParseError {
    description: String,
    region: SourceRegion,
}

impl ParseError {
    #[must_use]
    pub fn new(description: impl Into<String>, region: SourceRegion) -> Self {
        ParseError {
            description: description.into(),
            region,
        }
    }

    /// A human-readable description of what went wrong.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The region of the source document responsible for the error.
    #[must_use]
    pub fn region(&self) -> SourceRegion {
        self.region
    }
}

/// Represents all errors that can occur while working with TOML trees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed TOML source text
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Insertion of a key that is already present
    #[error("key '{key}' already exists in the table")]
    KeyExists { key: String },

    /// Array mutation outside the valid index range
    #[error("index {index} is out of bounds for an array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Conversion out of a node of the wrong type
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Rust type that has no TOML representation
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// `None` outside of a struct field or map entry
    #[error("unsupported None value")]
    UnsupportedNone,

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a key conflict error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::key_exists("name");
    /// assert!(err.to_string().contains("'name'"));
    /// ```
    pub fn key_exists(key: &str) -> Self {
        Error::KeyExists {
            key: key.to_string(),
        }
    }

    /// Creates an index error for an array of length `len`.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for types that cannot be represented in TOML.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
