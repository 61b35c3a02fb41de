use chrono::{FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Cursor;
use toml_tree::{
    from_node, from_reader, from_str, parse, to_node, to_string, to_table, to_writer, Date,
    DateTime, Error, Node, Time,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Config {
    title: String,
    owner: Owner,
    database: Database,
    servers: Vec<Server>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Owner {
    name: String,
    dob: DateTime,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Database {
    enabled: bool,
    ports: Vec<u16>,
    temp_targets: BTreeMap<String, f64>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Server {
    name: String,
    ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

fn config() -> Config {
    let mut temp_targets = BTreeMap::new();
    temp_targets.insert("case".to_string(), 72.0);
    temp_targets.insert("cpu".to_string(), 79.5);

    Config {
        title: "TOML Example".to_string(),
        owner: Owner {
            name: "Tom Preston-Werner".to_string(),
            dob: "1979-05-27T07:32:00-08:00".parse().unwrap(),
        },
        database: Database {
            enabled: true,
            ports: vec![8000, 8001, 8002],
            temp_targets,
        },
        servers: vec![
            Server {
                name: "alpha".to_string(),
                ip: "10.0.0.1".to_string(),
                role: Some("frontend".to_string()),
            },
            Server {
                name: "beta".to_string(),
                ip: "10.0.0.2".to_string(),
                role: None,
            },
        ],
    }
}

#[test]
fn test_nested_config_layout() {
    let toml = to_string(&config()).unwrap();
    let expected = r#"title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
enabled = true
ports = [ 8000, 8001, 8002 ]

  [database.temp_targets]
  case = 72.0
  cpu = 79.5

[[servers]]
name = "alpha"
ip = "10.0.0.1"
role = "frontend"

[[servers]]
name = "beta"
ip = "10.0.0.2"
"#;
    assert_eq!(toml, expected);
    assert_eq!(from_str::<Config>(&toml).unwrap(), config());
}

#[test]
fn test_deserialize_hand_written_document() {
    let text = r#"
title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
enabled = true
ports = [ 8000, 8001, 8002 ]
temp_targets = { cpu = 79.5, case = 72.0 }

[[servers]]
name = "alpha"
ip = "10.0.0.1"
role = "frontend"

[[servers]]
name = "beta"
ip = "10.0.0.2"
"#;
    assert_eq!(from_str::<Config>(text).unwrap(), config());
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Level {
    Debug,
    Info,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Backend {
    File(String),
    Memory { limit: u32 },
    Pair(i32, i32),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Logging {
    level: Level,
    backend: Backend,
}

#[test]
fn test_enums() {
    let logging = Logging {
        level: Level::Info,
        backend: Backend::File("app.log".to_string()),
    };
    let toml = to_string(&logging).unwrap();
    assert_eq!(toml, "level = \"Info\"\n\n[backend]\nFile = \"app.log\"\n");
    assert_eq!(from_str::<Logging>(&toml).unwrap(), logging);

    for backend in [Backend::Memory { limit: 64 }, Backend::Pair(1, -2)] {
        let logging = Logging {
            level: Level::Debug,
            backend,
        };
        let toml = to_string(&logging).unwrap();
        assert_eq!(from_str::<Logging>(&toml).unwrap(), logging);
    }

    let inline: Logging = from_str("level = 'Debug'\nbackend = { Memory = { limit = 8 } }").unwrap();
    assert_eq!(inline.backend, Backend::Memory { limit: 8 });
    assert!(from_str::<Logging>("level = 'Trace'\nbackend = { File = 'x' }").is_err());
    assert!(from_str::<Logging>("level = 1\nbackend = { File = 'x' }").is_err());
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Schedule {
    day: Date,
    at: Time,
    local: DateTime,
    stamped: chrono::DateTime<FixedOffset>,
}

#[test]
fn test_dates_and_chrono() {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let schedule = Schedule {
        day: Date::new(2024, 2, 29),
        at: Time::new(7, 30, 0, 0),
        local: "2024-02-29T07:30:00".parse().unwrap(),
        stamped: offset.with_ymd_and_hms(2024, 2, 29, 7, 30, 0).unwrap(),
    };

    let table = to_table(&schedule).unwrap();
    assert_eq!(table.get("day").and_then(Node::as_date), Some(schedule.day));
    assert_eq!(table.get("at").and_then(Node::as_time), Some(schedule.at));
    assert!(table.get("local").and_then(Node::as_date_time).unwrap().is_local());
    // chrono serializes itself as an RFC 3339 string
    assert_eq!(
        table.get("stamped").and_then(Node::as_str),
        Some("2024-02-29T07:30:00+02:00")
    );

    let toml = to_string(&schedule).unwrap();
    assert!(toml.contains("day = 2024-02-29\n"));
    assert!(toml.contains("at = 07:30:00\n"));
    assert_eq!(from_str::<Schedule>(&toml).unwrap(), schedule);

    let converted = DateTime::try_from(schedule.stamped).unwrap();
    assert_eq!(converted.offset, Some(120));
    assert_eq!(converted.to_chrono(), Some(schedule.stamped));
}

#[test]
fn test_chrono_reads_offset_date_times() {
    #[derive(Deserialize)]
    struct Event {
        when: chrono::DateTime<FixedOffset>,
    }

    let event: Event = from_str("when = 1979-05-27T07:32:00Z").unwrap();
    assert_eq!(event.when.timestamp(), 296_638_320);
}

#[test]
fn test_tuples_and_maps() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Shapes {
        origin: (i32, i32),
        labels: BTreeMap<String, Vec<String>>,
        weights: Vec<f64>,
    }

    let mut labels = BTreeMap::new();
    labels.insert("square".to_string(), vec!["red".to_string()]);
    labels.insert("circle with space".to_string(), vec![]);
    let shapes = Shapes {
        origin: (0, -1),
        labels,
        weights: vec![0.5, 1.0],
    };

    let toml = to_string(&shapes).unwrap();
    assert!(toml.contains("origin = [ 0, -1 ]\n"));
    assert!(toml.contains("\"circle with space\" = []\n"));
    assert_eq!(from_str::<Shapes>(&toml).unwrap(), shapes);
}

#[test]
fn test_unrepresentable_values() {
    #[derive(Serialize)]
    struct Big {
        value: u64,
    }
    #[derive(Serialize)]
    struct Marker;
    #[derive(Serialize)]
    struct WithUnit {
        marker: Marker,
    }

    assert!(matches!(
        to_string(&Big { value: u64::MAX }),
        Err(Error::UnsupportedType(_))
    ));
    assert!(to_string(&Big { value: 42 }).is_ok());
    assert!(to_string(&WithUnit { marker: Marker }).is_err());
    assert!(to_string(&42).is_err());
}

#[test]
fn test_shape_mismatch_errors() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Point {
        x: i32,
        y: i32,
    }

    assert!(from_str::<Point>("x = 'one'\ny = 2").is_err());
    let err = from_str::<Point>("x = 1").unwrap_err();
    assert!(err.to_string().contains("missing field `y`"));
    assert!(matches!(from_str::<Point>("x = [1"), Err(Error::Parse(_))));
}

#[test]
fn test_node_serde() {
    let doc = parse("a = 0xff\nb = [1, 'two']\nc = 1979-05-27\n[d]\ne = { f = true }").unwrap();

    let node = to_node(&Node::Table(doc.clone())).unwrap();
    assert_eq!(node, Node::Table(doc.clone()));

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["a"], 255);
    assert_eq!(json["b"][1], "two");
    assert_eq!(json["c"], "1979-05-27");
    assert_eq!(json["d"]["e"]["f"], true);

    let back: Node = from_node(Node::Table(doc.clone())).unwrap();
    assert_eq!(back, Node::Table(doc.clone()));
    let table = back.as_table().unwrap();
    assert_eq!(table.get("c").and_then(Node::as_date), Some(Date::new(1979, 5, 27)));

    let reread: toml_tree::Table = from_str(&doc.to_toml()).unwrap();
    assert_eq!(reread, doc);
}

#[test]
fn test_writer_and_reader() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &config()).unwrap();
    let read: Config = from_reader(Cursor::new(buffer)).unwrap();
    assert_eq!(read, config());
}
