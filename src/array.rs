//! Ordered, possibly heterogeneous TOML arrays.
//!
//! Reads are forgiving and writes are strict:
//!
//! - [`Array::get`] returns `None` past the end.
//! - [`Array::insert`] accepts `0..=len` (with `len` appending).
//! - [`Array::replace`] and [`Array::remove`] accept `0..len`. Anything else is an
//!   [`Error::IndexOutOfBounds`], and `replace` never falls back to inserting.
//!
//! ```rust
//! use toml_tree::{Array, Node};
//!
//! let mut array: Array = vec![1, 2, 3].into_iter().map(Node::from).collect();
//! assert!(array.replace(5, "x").is_err());
//! array.insert(3, "x").unwrap();
//! assert_eq!(array.len(), 4);
//! assert_eq!(array.last().and_then(Node::as_str), Some("x"));
//! ```

use crate::table::is_homogeneous;
use crate::{Error, Node, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered sequence of owned [`Node`]s.
///
/// Equality is element-wise and order-dependent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    elements: Vec<Node>,
}

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Array {
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            elements: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if every element has the same node type. An empty array is
    /// homogeneous.
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        is_homogeneous(self.elements.iter())
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns the element at `index`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.elements.get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.elements.get_mut(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Node> {
        self.elements.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Node> {
        self.elements.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Node> {
        self.elements.last_mut()
    }

    pub fn push(&mut self, value: impl Into<Node>) {
        self.elements.push(value.into());
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index > len()`.
    pub fn insert(&mut self, index: usize, value: impl Into<Node>) -> Result<()> {
        if index > self.elements.len() {
            return Err(Error::index_out_of_bounds(index, self.elements.len()));
        }
        self.elements.insert(index, value.into());
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn replace(&mut self, index: usize, value: impl Into<Node>) -> Result<Node> {
        let len = self.elements.len();
        match self.elements.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value.into())),
            None => Err(Error::index_out_of_bounds(index, len)),
        }
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<Node> {
        if index >= self.elements.len() {
            return Err(Error::index_out_of_bounds(index, self.elements.len()));
        }
        Ok(self.elements.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.elements.iter_mut()
    }

    /// Formats the array as an inline TOML value.
    #[must_use]
    pub fn to_toml(&self) -> String {
        let mut formatter = crate::TomlFormatter::new(crate::FormatOptions::default());
        formatter.write_array(self);
        formatter.into_inner()
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        let mut formatter = crate::JsonFormatter::new(crate::FormatOptions::default());
        formatter.write_array(self);
        formatter.into_inner()
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_toml())
    }
}

impl Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Array {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ArrayVisitor;

        impl<'de> de::Visitor<'de> for ArrayVisitor {
            type Value = Array;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a TOML array")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Array, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut array = Array::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element::<Node>()? {
                    array.push(elem);
                }
                Ok(array)
            }
        }

        deserializer.deserialize_seq(ArrayVisitor)
    }
}

impl From<Vec<Node>> for Array {
    fn from(elements: Vec<Node>) -> Self {
        Array { elements }
    }
}

impl From<Array> for Vec<Node> {
    fn from(array: Array) -> Self {
        array.elements
    }
}

impl FromIterator<Node> for Array {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        Array {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<Node> for Array {
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        self.elements.extend(iter);
    }
}

impl IntoIterator for Array {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
