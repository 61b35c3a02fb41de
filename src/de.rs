//! Serde deserialization out of TOML trees.
//!
//! [`NodeDeserializer`] drives any `T: Deserialize` from an owned [`Node`]. Parsing
//! text is the job of [`parse`](crate::parse); the text-consuming functions in the
//! crate root ([`from_str`](crate::from_str) and friends) parse first and then
//! deserialize the resulting table.
//!
//! - Integers of any base are offered as `i64`, so narrower Rust integers are
//!   range-checked by serde.
//! - Dates and times deserialize into [`Date`](crate::Date)/[`Time`](crate::Time)/
//!   [`DateTime`](crate::DateTime), into `String` as RFC 3339 text, and into
//!   [`Node`] without losing their type.
//! - A missing key deserializes into `None`; a present one into `Some`.
//! - Enums are externally tagged: a string names a unit variant, a single-key
//!   table names any other variant.
//!
//! ```rust
//! use serde::Deserialize;
//! use toml_tree::{from_node, toml};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Limits { max: u8, tags: Vec<String> }
//!
//! let node = toml!({ "max": 10, "tags": ["a", "b"] });
//! let limits: Limits = from_node(node).unwrap();
//! assert_eq!(limits, Limits { max: 10, tags: vec!["a".into(), "b".into()] });
//! ```

use crate::datetime::DATETIME_TOKEN;
use crate::{Array, Error, Node, Result, Table};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializer reading from an owned [`Node`].
pub struct NodeDeserializer {
    node: Node,
}

impl NodeDeserializer {
    pub fn new(node: Node) -> Self {
        NodeDeserializer { node }
    }
}

impl<'de> de::Deserializer<'de> for NodeDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            Node::Array(array) => visitor.visit_seq(SeqDeserializer::new(array)),
            Node::String(s) => visitor.visit_string(s),
            Node::Integer(i) => visitor.visit_i64(i.value()),
            Node::Float(f) => visitor.visit_f64(f),
            Node::Boolean(b) => visitor.visit_bool(b),
            Node::Date(date) => visitor.visit_map(MapDeserializer::temporal(date.to_string())),
            Node::Time(time) => visitor.visit_map(MapDeserializer::temporal(time.to_string())),
            Node::DateTime(dt) => visitor.visit_map(MapDeserializer::temporal(dt.to_string())),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Date(date) => visitor.visit_string(date.to_string()),
            Node::Time(time) => visitor.visit_string(time.to_string()),
            Node::DateTime(dt) => visitor.visit_string(dt.to_string()),
            other => NodeDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::String(s) => visitor.visit_enum(s.into_deserializer()),
            Node::Table(table) => {
                let mut entries = table.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom(
                        "expected a table with exactly one key naming the enum variant",
                    )),
                }
            }
            other => Err(Error::type_mismatch(
                "string or table for enum",
                other.node_type().name(),
            )),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier
    }
}

impl<'de> IntoDeserializer<'de, Error> for Node {
    type Deserializer = NodeDeserializer;

    fn into_deserializer(self) -> NodeDeserializer {
        NodeDeserializer::new(self)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Node>,
}

impl SeqDeserializer {
    fn new(array: Array) -> Self {
        SeqDeserializer {
            iter: Vec::from(array).into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed.deserialize(NodeDeserializer::new(node)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Node>,
    value: Option<Node>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }

    /// A one-entry map keyed by the private date marker.
    fn temporal(text: String) -> Self {
        let mut table = Table::new();
        table.insert_or_assign(DATETIME_TOKEN, text);
        MapDeserializer::new(table)
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(NodeDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Node,
}

impl EnumDeserializer {
    fn new(variant: String, value: Node) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name = IntoDeserializer::<Error>::into_deserializer(self.variant);
        let variant = seed.deserialize(name)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Node,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Node::Table(table) if table.is_empty() => Ok(()),
            other => Err(Error::type_mismatch(
                "unit variant",
                other.node_type().name(),
            )),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(NodeDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Node::Array(array) => visitor.visit_seq(SeqDeserializer::new(array)),
            other => Err(Error::type_mismatch(
                "array for tuple variant",
                other.node_type().name(),
            )),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Node::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            other => Err(Error::type_mismatch(
                "table for struct variant",
                other.node_type().name(),
            )),
        }
    }
}

/// Deserializes a `T` out of an owned [`Node`].
///
/// # Errors
///
/// Returns an error if the node's shape does not match `T`.
pub fn from_node<T>(node: Node) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(NodeDeserializer::new(node))
}

/// Deserializes a `T` out of an owned [`Table`].
///
/// # Errors
///
/// Returns an error if the table's shape does not match `T`.
pub fn from_table<T>(table: Table) -> Result<T>
where
    T: DeserializeOwned,
{
    from_node(Node::Table(table))
}
