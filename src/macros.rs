/// Builds a [`Node`](crate::Node) from a JSON-like literal.
///
/// - `[a, b]` becomes an array.
/// - `{ "key": value }` becomes a (non-inline) table, keeping key order.
/// - Any other expression goes through `Node::from`.
///
/// Elements and values are single token trees, so wrap negative numbers and longer
/// expressions in parentheses.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{toml, Node};
///
/// let config = toml!({
///     "name": "demo",
///     "offset": (-3),
///     "ports": [8080, 8081],
///     "owner": { "id": 7 }
/// });
///
/// let table = config.as_table().unwrap();
/// assert_eq!(table.get("offset").and_then(Node::as_i64), Some(-3));
/// assert_eq!(config.to_toml(), "name = \"demo\"\noffset = -3\nports = [ 8080, 8081 ]\n\n[owner]\nid = 7\n");
/// ```
#[macro_export]
macro_rules! toml {
    ([]) => {
        $crate::Node::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut array = $crate::Array::new();
        $(
            array.push($crate::toml!($elem));
        )*
        $crate::Node::Array(array)
    }};

    ({}) => {
        $crate::Node::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert_or_assign($key, $crate::toml!($value));
        )*
        $crate::Node::Table(table)
    }};

    ($other:expr) => {
        $crate::Node::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Array, Node, Table};

    #[test]
    fn test_toml_macro_scalars() {
        assert_eq!(toml!(true), Node::Boolean(true));
        assert_eq!(toml!(42).as_i64(), Some(42));
        assert_eq!(toml!(3.5).as_float(), Some(3.5));
        assert_eq!(toml!("hello").as_str(), Some("hello"));
    }

    #[test]
    fn test_toml_macro_arrays() {
        assert_eq!(toml!([]), Node::Array(Array::new()));

        let array = toml!([1, "two", [3]]).into_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(1).and_then(Node::as_str), Some("two"));
        assert!(array.get(2).unwrap().is_array());
    }

    #[test]
    fn test_toml_macro_tables() {
        assert_eq!(toml!({}), Node::Table(Table::new()));

        let table = toml!({ "b": 1, "a": { "c": false } }).into_table().unwrap();
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert!(!table.get("a").and_then(Node::as_table).unwrap().is_inline());
    }
}
