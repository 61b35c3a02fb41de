//! Reading and writing typed configuration through serde.
//!
//! Run with: cargo run --example serde_config

use serde::{Deserialize, Serialize};
use std::error::Error;
use toml_tree::{from_str, to_string, to_table, DateTime};

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    released: DateTime,
    #[serde(default)]
    debug: bool,
    database: Database,
    replicas: Vec<Replica>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Database {
    url: String,
    pool_size: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Replica {
    host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
}

const INPUT: &str = r#"
name = "inventory"
released = 2024-02-29T12:00:00Z

[database]
url = "postgres://localhost/inventory"
pool_size = 8

[[replicas]]
host = "db-1"
region = "eu-west"

[[replicas]]
host = "db-2"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut config: Config = from_str(INPUT)?;
    println!("{:#?}\n", config);

    if let Some(utc) = config.released.to_chrono() {
        println!("released {} seconds after the epoch\n", utc.timestamp());
    }

    config.debug = true;
    config.database.pool_size *= 2;
    println!("Serialized:\n{}", to_string(&config)?);

    let table = to_table(&config)?;
    println!("As JSON:\n{}", table.to_json());

    Ok(())
}
