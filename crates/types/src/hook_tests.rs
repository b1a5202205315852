// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::Duration;
use yare::parameterized;

#[parameterized(
    string = { FieldKind::String, Value::from("bar"), Converted::String("bar".to_string()) },
    boolean = { FieldKind::Bool, Value::Bool(true), Converted::Bool(true) },
    int_from_int = { FieldKind::Int64, Value::Int(42), Converted::Int64(42) },
    int_from_int32 = { FieldKind::Int64, Value::Int32(42), Converted::Int64(42) },
    int_from_int64 = { FieldKind::Int64, Value::Int64(42), Converted::Int64(42) },
    int8 = { FieldKind::Int8, Value::Int(-128), Converted::Int8(-128) },
    int16 = { FieldKind::Int16, Value::Int16(300), Converted::Int16(300) },
    int32 = { FieldKind::Int32, Value::Int(42), Converted::Int32(42) },
    float32 = { FieldKind::Float32, Value::Float32(1.25), Converted::Float32(1.25) },
    float32_from_float64 = { FieldKind::Float32, Value::Float64(0.5), Converted::Float32(0.5) },
    float64 = { FieldKind::Float64, Value::Float64(0.1), Converted::Float64(0.1) },
    strings = {
        FieldKind::StringList,
        Value::from(vec!["fake"]),
        Converted::StringList(vec!["fake".to_string()])
    },
    empty_strings = { FieldKind::StringList, Value::Seq(vec![]), Converted::StringList(vec![]) },
    duration = {
        FieldKind::NullDuration,
        Value::from("1m"),
        Converted::NullDuration(NullDuration::from_duration(Duration::MINUTE))
    },
    empty_duration = {
        FieldKind::NullDuration,
        Value::from(""),
        Converted::NullDuration(NullDuration::null())
    },
)]
fn converts_matching_kind(kind: FieldKind, value: Value, expected: Converted) {
    assert_eq!(null_decoder(kind, value).unwrap(), expected);
}

#[test]
fn test_float64_widens_float32_bits() {
    let converted = null_decoder(FieldKind::Float64, Value::Float32(0.1)).unwrap();
    assert_eq!(converted, Converted::Float64(f64::from(0.1f32)));
    assert_ne!(converted, Converted::Float64(0.1));
}

#[test]
fn test_any_passes_through() {
    let value: Value = [("nested", Value::Int(1))].into_iter().collect();
    assert_eq!(
        null_decoder(FieldKind::Any, value.clone()).unwrap(),
        Converted::Raw(value)
    );
}

#[parameterized(
    string_from_bool = { FieldKind::String, Value::Bool(true), "string", Kind::Bool },
    bool_from_string = { FieldKind::Bool, Value::from("invalid"), "bool", Kind::String },
    int_from_string = { FieldKind::Int64, Value::from("42"), "int", Kind::String },
    int32_from_bool = { FieldKind::Int32, Value::Bool(true), "int", Kind::Bool },
    int_from_float = { FieldKind::Int64, Value::Float64(1.0), "int", Kind::Float64 },
    int_from_uint = { FieldKind::Int64, Value::Uint(1), "int", Kind::Uint64 },
    float32_from_bool = { FieldKind::Float32, Value::Bool(true), "float32 or float64", Kind::Bool },
    float64_from_string = { FieldKind::Float64, Value::from("invalid"), "float32 or float64", Kind::String },
    float_from_int = { FieldKind::Float64, Value::Int(1), "float32 or float64", Kind::Int },
    duration_from_int = { FieldKind::NullDuration, Value::Int(10), "string", Kind::Int },
    strings_from_map = { FieldKind::StringList, Value::Map(Default::default()), "slice", Kind::Map },
    strings_from_string = { FieldKind::StringList, Value::from("solo"), "slice", Kind::String },
)]
fn rejects_mismatched_kind(kind: FieldKind, value: Value, expected: &'static str, actual: Kind) {
    let err = null_decoder(kind, value).unwrap_err();
    assert_eq!(err, HookError::Mismatch { expected, actual });
    assert_eq!(
        err.to_string(),
        format!("expected '{expected}', got '{actual}'")
    );
}

#[test]
fn test_string_list_element_mismatch() {
    let value = Value::Seq(vec![Value::from("a"), Value::Int(1)]);
    let err = null_decoder(FieldKind::StringList, value).unwrap_err();
    assert_eq!(
        err,
        HookError::Element {
            index: 1,
            error: Box::new(HookError::Mismatch {
                expected: "string",
                actual: Kind::Int,
            }),
        }
    );
}

#[test]
fn test_narrow_int_overflow() {
    let err = null_decoder(FieldKind::Int8, Value::Int(300)).unwrap_err();
    assert_eq!(
        err,
        HookError::Overflow {
            value: 300,
            kind: FieldKind::Int8,
        }
    );
    assert_eq!(err.to_string(), "value 300 overflows int8");
}

#[test]
fn test_float32_overflow() {
    let err = null_decoder(FieldKind::Float32, Value::Float64(1e300)).unwrap_err();
    assert_eq!(
        err,
        HookError::FloatOverflow {
            value: 1e300,
            kind: FieldKind::Float32,
        }
    );
    assert_eq!(
        err.to_string(),
        format!("value {} overflows float32", 1e300)
    );
}

#[test]
fn test_float32_keeps_non_finite_sources() {
    assert_eq!(
        null_decoder(FieldKind::Float32, Value::Float64(f64::INFINITY)).unwrap(),
        Converted::Float32(f32::INFINITY)
    );
    assert_eq!(
        null_decoder(FieldKind::Float32, Value::Float64(f64::from(f32::MAX))).unwrap(),
        Converted::Float32(f32::MAX)
    );
}

#[test]
fn test_duration_parse_error_propagates() {
    let err = null_decoder(FieldKind::NullDuration, Value::from("1d")).unwrap_err();
    assert_eq!(err.to_string(), r#"unknown unit "d" in duration "1d""#);
    assert!(matches!(err, HookError::Duration(_)));
}

#[test]
fn test_converted_kind_matches_field_kind() {
    for kind in [
        FieldKind::String,
        FieldKind::Bool,
        FieldKind::Int8,
        FieldKind::Int64,
        FieldKind::Float32,
        FieldKind::NullDuration,
    ] {
        let value = match kind {
            FieldKind::String | FieldKind::NullDuration => Value::from("5s"),
            FieldKind::Bool => Value::Bool(false),
            FieldKind::Float32 => Value::Float32(1.0),
            _ => Value::Int(5),
        };
        assert_eq!(null_decoder(kind, value).unwrap().kind(), kind);
    }
}
