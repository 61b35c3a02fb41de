//! Reporting parse errors with their source locations.
//!
//! Run with: cargo run --example parse_errors

use toml_tree::parse;

const BROKEN: &[&str] = &[
    "key = \n",
    "name = 'Tom'\nname = 'Pradyun'",
    "[fruit]\napple = 'red'\n\n[fruit]\norange = 'orange'",
    "s = \"bad \\x41 escape\"",
    "when = 2021-02-29",
    "point = { x = 1,\ny = 2 }",
    "ports = [ 8000 8001 ]",
];

fn main() {
    for input in BROKEN {
        match parse(input) {
            Ok(table) => println!("unexpectedly parsed: {:?}", table),
            Err(err) => {
                let region = err.region();
                println!("input:\n{}", input);
                println!("error: {}", err.description());
                println!(
                    "  at {}:{} .. {}:{}\n",
                    region.begin.line, region.begin.column, region.end.line, region.end.column
                );
            }
        }
    }
}
