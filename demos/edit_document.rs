//! Parsing a document, editing the tree, and writing it back out.
//!
//! Run with: cargo run --example edit_document

use std::error::Error;
use toml_tree::{parse, Node, Table};

const INPUT: &str = r#"
title = "Service"

[server]
host = "localhost"
ports = [ 8000, 8001 ]

[[upstream]]
name = "primary"
weight = 3
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = parse(INPUT)?;

    // Replace a value in place; the key keeps its position
    doc.insert_or_assign("title", "Edited service");

    let server = doc
        .get_mut("server")
        .and_then(Node::as_table_mut)
        .ok_or("missing [server]")?;
    server.insert("timeout", 30)?;
    let ports = server
        .get_mut("ports")
        .and_then(Node::as_array_mut)
        .ok_or("missing ports")?;
    ports.push(8002);
    ports.replace(0, 7999)?;

    // Inserting an existing key is rejected rather than overwritten
    if let Err(err) = server.insert("host", "example.com") {
        println!("insert refused: {}\n", err);
    }

    let mut fallback = Table::new();
    fallback.insert("name", "fallback")?;
    fallback.insert("weight", 1)?;
    doc.get_mut("upstream")
        .and_then(Node::as_array_mut)
        .ok_or("missing [[upstream]]")?
        .push(fallback);

    println!("TOML:\n{}", doc.to_toml());
    println!("JSON:\n{}", doc.to_json());

    Ok(())
}
