//! Serde serialization into TOML trees.
//!
//! [`NodeSerializer`] turns any `T: Serialize` into a [`Node`]. The text-producing
//! functions in the crate root ([`to_string`](crate::to_string) and friends) build
//! the tree first and then run the [`TomlFormatter`](crate::TomlFormatter) over it.
//!
//! ## Mapping
//!
//! | Rust | TOML |
//! |------|------|
//! | `bool`, integers, floats, `char`, `&str` | scalar nodes |
//! | `Vec<T>`, tuples, byte slices | arrays |
//! | structs, maps | tables |
//! | `Option<T>` field set to `None` | key omitted |
//! | unit enum variant | string |
//! | other enum variants | single-key table `{ Variant = ... }` |
//! | [`Date`](crate::Date), [`Time`](crate::Time), [`DateTime`](crate::DateTime) | date/time nodes |
//!
//! TOML has no null, so `None` anywhere other than a struct field or map value,
//! and `()` anywhere at all, are errors.
//!
//! ```rust
//! use serde::Serialize;
//! use toml_tree::{to_node, Node};
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16, user: Option<String> }
//!
//! let node = to_node(&Server { host: "localhost".into(), port: 8080, user: None }).unwrap();
//! let table = node.as_table().unwrap();
//! assert_eq!(table.get("port").and_then(Node::as_i64), Some(8080));
//! assert!(!table.contains_key("user"));
//! ```

use crate::datetime::DATETIME_TOKEN;
use crate::{Array, Error, Node, Result, Table};
use serde::{ser, Serialize};

/// Serializer producing a [`Node`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeSerializer;

pub struct SerializeVec {
    vec: Array,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: Table,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        Ok(Node::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        i64::try_from(v)
            .map(Node::from)
            .map_err(|_| Error::unsupported_type("u64 values above i64::MAX"))
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        Ok(Node::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        Ok(Node::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        Ok(Node::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        Ok(Node::Array(v.iter().map(|&b| Node::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Node> {
        Err(Error::UnsupportedNone)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Err(Error::unsupported_type("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Node> {
        Err(Error::unsupported_type(&format!("unit struct {}", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        let node = value.serialize(self)?;
        match node {
            Node::String(text) if name == DATETIME_TOKEN => {
                crate::parser::parse_literal(&text).map_err(Error::from)
            }
            other => Ok(other),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        Ok(tag_variant(Some(variant), to_node(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Array::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_node(value)?);
        Ok(())
    }

    fn finish(self) -> Node {
        tag_variant(self.variant, Node::Array(self.vec))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: Table::new(),
            current_key: None,
            variant,
        }
    }

    /// Inserts a field, skipping it entirely when the value is `None`.
    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        match to_node(value) {
            Ok(node) => {
                self.map.insert_or_assign(key, node);
                Ok(())
            }
            Err(Error::UnsupportedNone) => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn finish(self) -> Node {
        tag_variant(self.variant, Node::Table(self.map))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Node;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_node(key)? {
            Node::String(s) => s,
            Node::Integer(i) => i.value().to_string(),
            Node::Boolean(b) => b.to_string(),
            other => {
                return Err(Error::custom(format!(
                    "table keys must be strings, found {}",
                    other.node_type()
                )))
            }
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

fn tag_variant(variant: Option<&'static str>, node: Node) -> Node {
    match variant {
        Some(name) => {
            let mut table = Table::new();
            table.insert_or_assign(name, node);
            Node::Table(table)
        }
        None => node,
    }
}

/// Converts any `T: Serialize` into a [`Node`].
///
/// # Errors
///
/// Returns an error if `value` contains something TOML cannot represent, such as
/// `()`, a top-level `None`, or a `u64` above `i64::MAX`.
pub fn to_node<T>(value: &T) -> Result<Node>
where
    T: ?Sized + Serialize,
{
    value.serialize(NodeSerializer)
}
