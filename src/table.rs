//! Ordered TOML tables.
//!
//! [`Table`] wraps an [`IndexMap`] so that keys keep their insertion order. That
//! order is what the formatters emit, so a document edited in place reads the way
//! it was written.
//!
//! ## Insert vs. assign
//!
//! - [`Table::insert`] never overwrites: an existing key is an [`Error::KeyExists`].
//! - [`Table::insert_or_assign`] always succeeds, replacing the old value in place.
//!
//! ```rust
//! use toml_tree::{Error, Table};
//!
//! let mut table = Table::new();
//! table.insert("name", "Alice").unwrap();
//! assert_eq!(table.insert("name", "Bob"), Err(Error::key_exists("name")));
//!
//! table.insert_or_assign("name", "Bob");
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Bob"));
//! ```
//!
//! ## Equality
//!
//! Tables compare by content, not by order, and ignore the inline flag:
//!
//! ```rust
//! use toml_tree::parse;
//!
//! assert_eq!(parse("a = 1\nb = 2").unwrap(), parse("b = 2\na = 1").unwrap());
//! ```

use crate::{Error, FormatOptions, Node, NodeType, ParseError, Result};
use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ordered mapping of string keys to owned [`Node`]s.
///
/// # Examples
///
/// ```rust
/// use toml_tree::Table;
///
/// let mut table = Table::new();
/// table.insert("first", 1).unwrap();
/// table.insert("second", 2).unwrap();
///
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: IndexMap<String, Node>,
    inline: bool,
}

impl Table {
    /// Creates an empty, non-inline table.
    #[must_use]
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
            inline: false,
        }
    }

    /// Creates an empty table that formats as `{ k = v }`.
    #[must_use]
    pub fn new_inline() -> Self {
        Table {
            entries: IndexMap::new(),
            inline: true,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: IndexMap::with_capacity(capacity),
            inline: false,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if every value has the same [`NodeType`]. An empty table is
    /// homogeneous.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::parse;
    ///
    /// assert!(parse("a = 1\nb = 2").unwrap().is_homogeneous());
    /// assert!(!parse("a = 1\n[b]").unwrap().is_homogeneous());
    /// ```
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        is_homogeneous(self.entries.values())
    }

    /// Returns a reference to the value stored under `key`, or `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Inserts `value` under `key` at the end of the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyExists`] if `key` is already present. The table is
    /// left unchanged.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Result<()> {
        use indexmap::map::Entry;

        match self.entries.entry(key.into()) {
            Entry::Occupied(entry) => Err(Error::key_exists(entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                Ok(())
            }
        }
    }

    /// Inserts `value` under `key`, replacing and returning any previous value.
    /// A replaced key keeps its position.
    pub fn insert_or_assign(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Node>,
    ) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining entries. A missing key
    /// is not an error.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Marks the table as inline (`{ k = v }`) or not. Affects formatting only.
    pub fn set_inline(&mut self, inline: bool) {
        self.inline = inline;
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.entries.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Node> {
        self.entries.values_mut()
    }

    /// Returns an iterator over the key-value pairs of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Node> {
        self.entries.iter_mut()
    }

    /// Formats the table as a TOML document with default options.
    #[must_use]
    pub fn to_toml(&self) -> String {
        crate::to_toml_string(self)
    }

    #[must_use]
    pub fn to_toml_with_options(&self, options: FormatOptions) -> String {
        crate::to_toml_string_with_options(self, options)
    }

    /// Formats the table as a JSON object with default options.
    #[must_use]
    pub fn to_json(&self) -> String {
        crate::to_json_string(self)
    }

    #[must_use]
    pub fn to_json_with_options(&self, options: FormatOptions) -> String {
        crate::to_json_string_with_options(self, options)
    }
}

pub(crate) fn is_homogeneous<'a>(mut values: impl Iterator<Item = &'a Node>) -> bool {
    match values.next() {
        Some(first) => {
            let expected: NodeType = first.node_type();
            values.all(|v| v.node_type() == expected)
        }
        None => true,
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality is order-independent
        self.entries == other.entries
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_toml())
    }
}

impl FromStr for Table {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, ParseError> {
        crate::parse(s)
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> de::Visitor<'de> for TableVisitor {
            type Value = Table;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a TOML table")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Table, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Node>()? {
                    table.insert_or_assign(key, value);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

impl IntoIterator for Table {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Later duplicates overwrite earlier ones, as with [`Table::insert_or_assign`].
impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<Node>> Extend<(K, V)> for Table {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert_or_assign(key, value);
        }
    }
}
