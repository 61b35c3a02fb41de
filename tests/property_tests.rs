//! Property-based tests for the tree operations and the format/parse round trip.

use proptest::prelude::*;
use toml_tree::{parse, Array, Date, DateTime, FormatOptions, Integer, IntegerBase, Node, Table, Time};

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z][a-z0-9_-]{0,7}",
        1 => any::<String>(),
        1 => "[ .=\"'\\\\#\\[\\]]{0,4}",
    ]
}

fn date() -> impl Strategy<Value = Date> {
    (1u16..=9999, 1u8..=12, 1u8..=28).prop_map(|(y, m, d)| Date::new(y, m, d))
}

fn time() -> impl Strategy<Value = Time> {
    (0u8..24, 0u8..60, 0u8..60, prop_oneof![Just(0u32), 0u32..1_000_000_000])
        .prop_map(|(h, m, s, ns)| Time::new(h, m, s, ns))
}

fn integer() -> impl Strategy<Value = Node> {
    let base = prop_oneof![
        Just(IntegerBase::Decimal),
        Just(IntegerBase::Binary),
        Just(IntegerBase::Octal),
        Just(IntegerBase::Hexadecimal),
    ];
    (any::<i64>(), base).prop_map(|(value, base)| Node::from(Integer::with_base(value, base)))
}

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        any::<String>().prop_map(Node::from),
        "[\\x00-\\x1f\\x7f\"'\\\\a\n\t]{0,8}".prop_map(Node::from),
        integer(),
        prop::num::f64::NORMAL.prop_map(Node::from),
        (-1.0e6f64..1.0e6).prop_map(Node::from),
        prop_oneof![Just(f64::INFINITY), Just(f64::NEG_INFINITY), Just(f64::NAN)]
            .prop_map(Node::from),
        any::<bool>().prop_map(Node::from),
        date().prop_map(Node::from),
        time().prop_map(Node::from),
        (date(), time(), prop::option::of(-1439i16..=1439))
            .prop_map(|(d, t, offset)| Node::from(DateTime::new(d, t, offset))),
    ]
}

fn node() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|elements| Node::Array(Array::from(elements))),
            (prop::collection::vec((key(), inner), 0..6), any::<bool>()).prop_map(
                |(entries, inline)| {
                    let mut table: Table = entries.into_iter().collect();
                    table.set_inline(inline);
                    Node::Table(table)
                }
            ),
        ]
    })
}

fn document() -> impl Strategy<Value = Table> {
    prop::collection::vec((key(), node()), 0..8).prop_map(|entries| entries.into_iter().collect())
}

fn permissive() -> FormatOptions {
    FormatOptions::new()
        .with_literal_strings(true)
        .with_multiline_strings(true)
        .with_real_tabs_in_strings(true)
}

/// Integer equality ignores the base, so compare bases separately. Negative
/// values are always written in decimal.
fn same_bases(written: &Node, read: &Node) -> bool {
    match (written, read) {
        (Node::Integer(a), Node::Integer(b)) => a.value() < 0 || a.base() == b.base(),
        (Node::Array(a), Node::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| same_bases(x, y))
        }
        (Node::Table(a), Node::Table(b)) => a
            .iter()
            .all(|(k, v)| b.get(k).map_or(false, |other| same_bases(v, other))),
        _ => true,
    }
}

proptest! {
    #[test]
    fn prop_toml_round_trip(table in document()) {
        let text = table.to_toml();
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "failed to reparse:\n{}\n{:?}", text, parsed);
        let parsed = parsed.unwrap();
        prop_assert!(
            same_bases(&Node::Table(table.clone()), &Node::Table(parsed.clone())),
            "integer base changed:\n{}",
            text
        );
        prop_assert_eq!(parsed, table);
    }

    #[test]
    fn prop_round_trip_under_other_options(table in document()) {
        for options in [FormatOptions::compact(), permissive()] {
            let text = table.to_toml_with_options(options);
            prop_assert_eq!(parse(&text).ok(), Some(table.clone()), "formatted as:\n{}", text);
        }
    }

    #[test]
    fn prop_json_is_valid(table in document()) {
        let pretty: Result<serde_json::Value, _> = serde_json::from_str(&table.to_json());
        prop_assert!(pretty.is_ok());
        let compact = table.to_json_with_options(FormatOptions::compact());
        let compact: Result<serde_json::Value, _> = serde_json::from_str(&compact);
        prop_assert_eq!(compact.ok(), pretty.ok());
    }

    #[test]
    fn prop_insertion_order_is_kept(keys in prop::collection::vec(key(), 0..16)) {
        let mut table = Table::new();
        let mut expected: Vec<String> = Vec::new();
        for (i, k) in keys.iter().enumerate() {
            if table.insert(k.clone(), i as i64).is_ok() {
                expected.push(k.clone());
            } else {
                prop_assert!(expected.contains(k));
            }
        }
        let actual: Vec<String> = table.keys().cloned().collect();
        prop_assert_eq!(&actual, &expected);

        let reparsed = parse(&table.to_toml()).unwrap();
        let reparsed: Vec<String> = reparsed.keys().cloned().collect();
        prop_assert_eq!(reparsed, expected);
    }

    #[test]
    fn prop_array_bounds(len in 0usize..10, index in 0usize..20) {
        let mut array: Array = (0..len as i64).map(Node::from).collect();

        let inserted = array.insert(index, "x");
        prop_assert_eq!(inserted.is_ok(), index <= len);

        let len = array.len();
        let replaced = array.replace(index, "y");
        prop_assert_eq!(replaced.is_ok(), index < len);
        prop_assert_eq!(array.len(), len);

        let removed = array.remove(index);
        prop_assert_eq!(removed.is_ok(), index < len);
    }

    #[test]
    fn prop_table_equality_ignores_order(entries in prop::collection::btree_map(key(), any::<i64>(), 0..8)) {
        let forward: Table = entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let backward: Table = entries.iter().rev().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(forward, backward);
    }
}
