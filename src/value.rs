//! The polymorphic unit of a TOML tree.
//!
//! A [`Node`] is exactly one of nine variants: a [`Table`], an [`Array`], or one of
//! seven scalars. A node's variant never changes; replacing a value means building
//! a new node. Containers own their children outright, so a tree is always a tree.
//!
//! ## Down-casting
//!
//! Every `as_*` accessor returns `None` when the node holds a different variant.
//! A wrong guess is never an error:
//!
//! ```rust
//! use toml_tree::Node;
//!
//! let node = Node::from(42);
//! assert_eq!(node.as_i64(), Some(42));
//! assert_eq!(node.as_str(), None);
//! assert!(node.as_table().is_none());
//! ```
//!
//! ## Integer display base
//!
//! [`Integer`] carries a [`IntegerBase`] that only affects how the value is written
//! back out:
//!
//! ```rust
//! use toml_tree::{Integer, IntegerBase};
//!
//! let hex = Integer::with_base(255, IntegerBase::Hexadecimal);
//! assert_eq!(hex.to_string(), "0xff");
//! assert_eq!(hex, Integer::new(255));
//! ```

use crate::datetime::DATETIME_TOKEN;
use crate::{Array, Date, DateTime, Error, Result, Table, Time};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One tagged value in a TOML tree.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Node, NodeType, Table};
///
/// let node = Node::from(Table::new());
/// assert_eq!(node.node_type(), NodeType::Table);
/// assert!(node.is_table());
/// ```
#[derive(Clone, Debug)]
pub enum Node {
    Table(Table),
    Array(Array),
    String(String),
    Integer(Integer),
    Float(f64),
    Boolean(bool),
    Date(Date),
    Time(Time),
    DateTime(DateTime),
}

/// Structural equality. Tables compare without regard to key order, and two NaN
/// floats are equal so that a parsed `nan` survives a format round trip.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Table(a), Node::Table(b)) => a == b,
            (Node::Array(a), Node::Array(b)) => a == b,
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Integer(a), Node::Integer(b)) => a == b,
            (Node::Float(a), Node::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Node::Boolean(a), Node::Boolean(b)) => a == b,
            (Node::Date(a), Node::Date(b)) => a == b,
            (Node::Time(a), Node::Time(b)) => a == b,
            (Node::DateTime(a), Node::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

/// The tag of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Table,
    Array,
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Time,
    DateTime,
}

impl NodeType {
    /// The lowercase TOML name of this type, e.g. `"date-time"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            NodeType::Table => "table",
            NodeType::Array => "array",
            NodeType::String => "string",
            NodeType::Integer => "integer",
            NodeType::Float => "float",
            NodeType::Boolean => "boolean",
            NodeType::Date => "date",
            NodeType::Time => "time",
            NodeType::DateTime => "date-time",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an integer is written back out. Never affects the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IntegerBase {
    #[default]
    Decimal,
    Binary,
    Octal,
    Hexadecimal,
}

/// A signed 64-bit TOML integer plus its display base.
///
/// Equality, ordering, and hashing look at the value only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Integer {
    value: i64,
    base: IntegerBase,
}

impl Integer {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Integer {
            value,
            base: IntegerBase::Decimal,
        }
    }

    #[must_use]
    pub const fn with_base(value: i64, base: IntegerBase) -> Self {
        Integer { value, base }
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub const fn base(&self) -> IntegerBase {
        self.base
    }

    pub fn set_base(&mut self, base: IntegerBase) {
        self.base = base;
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// Writes the integer in its display base. Negative values are always decimal,
/// since TOML prefixed literals are unsigned.
impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value < 0 {
            return write!(f, "{}", self.value);
        }
        match self.base {
            IntegerBase::Decimal => write!(f, "{}", self.value),
            IntegerBase::Binary => write!(f, "0b{:b}", self.value),
            IntegerBase::Octal => write!(f, "0o{:o}", self.value),
            IntegerBase::Hexadecimal => write!(f, "0x{:x}", self.value),
        }
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::new(value)
    }
}

impl From<Integer> for i64 {
    fn from(value: Integer) -> Self {
        value.value
    }
}

/// Serializes as a plain `i64`; the display base does not survive serde.
impl Serialize for Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.value)
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(Integer::new)
    }
}

impl Node {
    /// Returns the tag of this node.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Node::Table(_) => NodeType::Table,
            Node::Array(_) => NodeType::Array,
            Node::String(_) => NodeType::String,
            Node::Integer(_) => NodeType::Integer,
            Node::Float(_) => NodeType::Float,
            Node::Boolean(_) => NodeType::Boolean,
            Node::Date(_) => NodeType::Date,
            Node::Time(_) => NodeType::Time,
            Node::DateTime(_) => NodeType::DateTime,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Node::Table(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Node::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Node::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Node::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Node::Date(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_time(&self) -> bool {
        matches!(self, Node::Time(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date_time(&self) -> bool {
        matches!(self, Node::DateTime(_))
    }

    /// Returns `true` for every variant except tables and arrays.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Node::Table(_) | Node::Array(_))
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    /// If the node is a string, returns a reference to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Node;
    ///
    /// assert_eq!(Node::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Node::from(true).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the node is an integer, returns it together with its display base.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Node::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the node is an integer, returns its value. Floats are not converted.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().map(|i| i.value())
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Node::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_time(&self) -> Option<Time> {
        match self {
            Node::Time(t) => Some(*t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date_time(&self) -> Option<DateTime> {
        match self {
            Node::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_table(self) -> Option<Table> {
        match self {
            Node::Table(table) => Some(table),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_array(self) -> Option<Array> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Formats the node as TOML: tables as documents, everything else as an
    /// inline value.
    #[must_use]
    pub fn to_toml(&self) -> String {
        let mut formatter = crate::TomlFormatter::new(crate::FormatOptions::default());
        formatter.write_node(self);
        formatter.into_inner()
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        let mut formatter = crate::JsonFormatter::new(crate::FormatOptions::default());
        formatter.write_node(self);
        formatter.into_inner()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_toml())
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Table(table) => table.serialize(serializer),
            Node::Array(array) => array.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Integer(i) => i.serialize(serializer),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::Boolean(b) => serializer.serialize_bool(*b),
            Node::Date(d) => d.serialize(serializer),
            Node::Time(t) => t.serialize(serializer),
            Node::DateTime(dt) => dt.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> de::Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Node, E> {
                Ok(Node::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Node, E> {
                Ok(Node::Integer(Integer::new(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Node, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(|v| Node::Integer(Integer::new(v)))
                    .map_err(|_| E::custom(format!("integer {} is out of range", value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Node, E> {
                Ok(Node::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Node, E> {
                Ok(Node::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Node, E> {
                Ok(Node::String(value))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Node, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Node, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut array = Array::new();
                while let Some(elem) = seq.next_element::<Node>()? {
                    array.push(elem);
                }
                Ok(Node::Array(array))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Node, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == DATETIME_TOKEN {
                        let text: String = map.next_value()?;
                        return match crate::parser::parse_literal(&text) {
                            Ok(node @ (Node::Date(_) | Node::Time(_) | Node::DateTime(_))) => {
                                Ok(node)
                            }
                            _ => Err(de::Error::custom(format!(
                                "invalid date or time '{}'",
                                text
                            ))),
                        };
                    }
                    let value: Node = map.next_value()?;
                    table.insert_or_assign(key, value);
                }
                Ok(Node::Table(table))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

impl TryFrom<Node> for i64 {
    type Error = Error;

    fn try_from(value: Node) -> Result<Self> {
        match value {
            Node::Integer(i) => Ok(i.value()),
            other => Err(Error::type_mismatch("integer", other.node_type().name())),
        }
    }
}

impl TryFrom<Node> for f64 {
    type Error = Error;

    fn try_from(value: Node) -> Result<Self> {
        match value {
            Node::Float(f) => Ok(f),
            Node::Integer(i) => Ok(i.value() as f64),
            other => Err(Error::type_mismatch("float", other.node_type().name())),
        }
    }
}

impl TryFrom<Node> for bool {
    type Error = Error;

    fn try_from(value: Node) -> Result<Self> {
        match value {
            Node::Boolean(b) => Ok(b),
            other => Err(Error::type_mismatch("boolean", other.node_type().name())),
        }
    }
}

impl TryFrom<Node> for String {
    type Error = Error;

    fn try_from(value: Node) -> Result<Self> {
        match value {
            Node::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.node_type().name())),
        }
    }
}

impl TryFrom<Node> for Table {
    type Error = Error;

    fn try_from(value: Node) -> Result<Self> {
        match value {
            Node::Table(table) => Ok(table),
            other => Err(Error::type_mismatch("table", other.node_type().name())),
        }
    }
}

impl TryFrom<Node> for Array {
    type Error = Error;

    fn try_from(value: Node) -> Result<Self> {
        match value {
            Node::Array(array) => Ok(array),
            other => Err(Error::type_mismatch("array", other.node_type().name())),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Integer(Integer::new(i64::from(value)))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<Integer> for Node {
    fn from(value: Integer) -> Self {
        Node::Integer(value)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Float(f64::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<Date> for Node {
    fn from(value: Date) -> Self {
        Node::Date(value)
    }
}

impl From<Time> for Node {
    fn from(value: Time) -> Self {
        Node::Time(value)
    }
}

impl From<DateTime> for Node {
    fn from(value: DateTime) -> Self {
        Node::DateTime(value)
    }
}

impl From<Table> for Node {
    fn from(value: Table) -> Self {
        Node::Table(value)
    }
}

impl From<Array> for Node {
    fn from(value: Array) -> Self {
        Node::Array(value)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(value: Vec<T>) -> Self {
        Node::Array(value.into_iter().map(Into::into).collect())
    }
}
