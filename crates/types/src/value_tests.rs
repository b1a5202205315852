// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use yare::parameterized;

#[parameterized(
    null = { Value::Null, "invalid" },
    boolean = { Value::Bool(true), "bool" },
    int = { Value::Int(1), "int" },
    int8 = { Value::Int8(1), "int8" },
    int16 = { Value::Int16(1), "int16" },
    int32 = { Value::Int32(1), "int32" },
    int64 = { Value::Int64(1), "int64" },
    uint = { Value::Uint(1), "uint64" },
    float32 = { Value::Float32(1.0), "float32" },
    float64 = { Value::Float64(1.0), "float64" },
    string = { Value::from("x"), "string" },
    seq = { Value::Seq(vec![]), "slice" },
    map = { Value::Map(BTreeMap::new()), "map" },
)]
fn kind_labels(value: Value, label: &str) {
    assert_eq!(value.kind().label(), label);
    assert_eq!(value.kind().to_string(), label);
}

#[test]
fn test_primitive_conversions_keep_width() {
    assert_eq!(Value::from(42i32), Value::Int32(42));
    assert_eq!(Value::from(42i64), Value::Int64(42));
    assert_eq!(Value::from(2.5f32), Value::Float32(2.5));
    assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    assert_eq!(Value::from(None::<bool>), Value::Null);
    assert_eq!(
        Value::from(vec!["a", "b"]),
        Value::Seq(vec![Value::from("a"), Value::from("b")])
    );
}

#[test]
fn test_from_iterator_builds_map() {
    let value: Value = [("a", Value::Int(1)), ("b", Value::Bool(false))]
        .into_iter()
        .collect();
    assert_eq!(value.get("a"), Some(&Value::Int(1)));
    assert_eq!(value.get("b"), Some(&Value::Bool(false)));
    assert_eq!(value.get("c"), None);
}

#[test]
fn test_as_i64() {
    assert_eq!(Value::Int8(-3).as_i64(), Some(-3));
    assert_eq!(Value::Int32(7).as_i64(), Some(7));
    assert_eq!(Value::Uint(7).as_i64(), None);
    assert_eq!(Value::from("7").as_i64(), None);
}

#[test]
fn test_from_json_value() {
    let json = serde_json::json!({
        "n": 42,
        "big": u64::MAX,
        "f": 1.5,
        "s": "x",
        "b": true,
        "list": ["a", 1],
        "none": null,
    });
    let value = Value::from(json);
    assert_eq!(value.get("n"), Some(&Value::Int(42)));
    assert_eq!(value.get("big"), Some(&Value::Uint(u64::MAX)));
    assert_eq!(value.get("f"), Some(&Value::Float64(1.5)));
    assert_eq!(value.get("s"), Some(&Value::from("x")));
    assert_eq!(value.get("b"), Some(&Value::Bool(true)));
    assert_eq!(
        value.get("list"),
        Some(&Value::Seq(vec![Value::from("a"), Value::Int(1)]))
    );
    assert_eq!(value.get("none"), Some(&Value::Null));
}

#[test]
fn test_deserialize_matches_json_conversion() {
    let raw = r#"{"n": 42, "f": 0.5, "s": ["x"], "nested": {"b": false}, "z": null}"#;
    let direct: Value = serde_json::from_str(raw).unwrap();
    let converted = Value::from(serde_json::from_str::<serde_json::Value>(raw).unwrap());
    assert_eq!(direct, converted);
}

#[test]
fn test_from_toml_value() {
    let doc: toml::Table = toml::from_str(
        r#"
        name = "load"
        vus = 10
        ratio = 0.25
        enabled = true
        started = 1979-05-27T07:32:00Z
        tags = ["a", "b"]

        [limits]
        timeout = "30s"
        "#,
    )
    .unwrap();
    let value = Value::from(toml::Value::Table(doc));

    assert_eq!(value.get("name"), Some(&Value::from("load")));
    assert_eq!(value.get("vus"), Some(&Value::Int(10)));
    assert_eq!(value.get("ratio"), Some(&Value::Float64(0.25)));
    assert_eq!(value.get("enabled"), Some(&Value::Bool(true)));
    assert_eq!(
        value.get("started"),
        Some(&Value::from("1979-05-27T07:32:00Z"))
    );
    assert_eq!(value.get("tags"), Some(&Value::from(vec!["a", "b"])));
    assert_eq!(
        value.get("limits").and_then(|l| l.get("timeout")),
        Some(&Value::from("30s"))
    );
}

#[test]
fn test_deserialize_toml_datetime_as_string() {
    let raw = r#"
        started = 1979-05-27T07:32:00Z
        [window]
        until = 1979-05-27
        "#;
    let direct: Value = toml::from_str(raw).unwrap();
    let converted = Value::from(toml::Value::Table(toml::from_str(raw).unwrap()));

    assert_eq!(
        direct.get("started"),
        Some(&Value::from("1979-05-27T07:32:00Z"))
    );
    assert_eq!(
        direct.get("window").and_then(|w| w.get("until")),
        Some(&Value::from("1979-05-27"))
    );
    assert_eq!(direct, converted);
}

#[test]
fn test_seq_preallocation_is_bounded() {
    assert_eq!(cautious_capacity(None), 0);
    assert_eq!(cautious_capacity(Some(3)), 3);
    assert!(cautious_capacity(Some(usize::MAX)) * std::mem::size_of::<Value>() <= 1024 * 1024);
}
