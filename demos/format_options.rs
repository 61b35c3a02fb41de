//! Tuning TOML and JSON output with FormatOptions.
//!
//! Run with: cargo run --example format_options

use std::error::Error;
use toml_tree::{toml, FormatOptions, Integer, IntegerBase, Node};

fn main() -> Result<(), Box<dyn Error>> {
    let mut node = toml!({
        "path": "C:\\Users\\demo",
        "motd": "Welcome!\nHave a\tnice day.",
        "ratio": (f64::INFINITY),
        "released": (toml_tree::Date::new(2024, 2, 29)),
        "owner": { "id": 7, "team": { "name": "core" } },
        "samples": (
            (0..40).map(|i| Node::from(i * 1000)).collect::<toml_tree::Array>()
        )
    });
    if let Some(table) = node.as_table_mut() {
        table.insert("mask", Integer::with_base(0xff, IntegerBase::Hexadecimal))?;
    }
    let table = node.as_table().ok_or("not a table")?;

    println!("Default:\n{}", table.to_toml());

    let relaxed = FormatOptions::new()
        .with_literal_strings(true)
        .with_multiline_strings(true)
        .with_real_tabs_in_strings(true)
        .with_quoted_dates_and_times(true)
        .with_quoted_infinities_and_nans(true);
    println!("Literal and multi-line strings:\n{}", table.to_toml_with_options(relaxed));

    let plain = FormatOptions::new().with_integer_bases(false).with_indent(4);
    println!("Decimal integers, four-space indent:\n{}", table.to_toml_with_options(plain));

    println!("Compact:\n{}", table.to_toml_with_options(FormatOptions::compact()));

    println!("JSON:\n{}\n", table.to_json());
    println!(
        "Compact JSON:\n{}",
        table.to_json_with_options(FormatOptions::compact())
    );

    Ok(())
}
