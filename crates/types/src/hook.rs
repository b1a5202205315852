// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Conversion hook from loosely-typed values to nullable field types.
//!
//! The [`Decoder`](crate::Decoder) calls a [`DecodeHook`] once per field with
//! the field's declared [`FieldKind`] and the source [`Value`]. The default
//! hook, [`null_decoder`], accepts a source only when its kind matches the
//! field exactly. Numeric strings are not ints and ints are not floats.

use crate::duration::DurationError;
use crate::null_duration::NullDuration;
use crate::value::{Kind, Value};
use std::fmt;
use thiserror::Error;

/// Declared kind of a destination field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    StringList,
    String,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    NullDuration,
    /// Any other field type; the hook passes the value through.
    Any,
}

impl FieldKind {
    /// Label for the accepted source kind, as used in mismatch errors.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::StringList => "slice",
            Self::String | Self::NullDuration => "string",
            Self::Bool => "bool",
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => "int",
            Self::Float32 | Self::Float64 => "float32 or float64",
            Self::Any => "any",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::StringList => "string list",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::NullDuration => "duration",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted field value, ready to be assigned.
#[derive(Clone, Debug, PartialEq)]
pub enum Converted {
    StringList(Vec<String>),
    String(String),
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    NullDuration(NullDuration),
    /// Source value handed back unchanged.
    Raw(Value),
}

impl Converted {
    /// The field kind this conversion can be assigned to.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::StringList(_) => FieldKind::StringList,
            Self::String(_) => FieldKind::String,
            Self::Bool(_) => FieldKind::Bool,
            Self::Int8(_) => FieldKind::Int8,
            Self::Int16(_) => FieldKind::Int16,
            Self::Int32(_) => FieldKind::Int32,
            Self::Int64(_) => FieldKind::Int64,
            Self::Float32(_) => FieldKind::Float32,
            Self::Float64(_) => FieldKind::Float64,
            Self::NullDuration(_) => FieldKind::NullDuration,
            Self::Raw(_) => FieldKind::Any,
        }
    }
}

/// Why a hook rejected a value.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HookError {
    #[error("expected '{expected}', got '{actual}'")]
    Mismatch { expected: &'static str, actual: Kind },

    #[error("value {value} overflows {kind}")]
    Overflow { value: i64, kind: FieldKind },

    #[error("value {value} overflows {kind}")]
    FloatOverflow { value: f64, kind: FieldKind },

    #[error(transparent)]
    Duration(#[from] DurationError),

    /// A sequence element was rejected; reported as `<field>[<index>]`.
    #[error("[{index}]: {error}")]
    Element { index: usize, error: Box<HookError> },

    #[error("hook produced a {produced} value for a {expected} field")]
    UnexpectedConversion {
        expected: FieldKind,
        produced: FieldKind,
    },
}

impl HookError {
    pub fn mismatch(kind: FieldKind, value: &Value) -> Self {
        Self::Mismatch {
            expected: kind.expected(),
            actual: value.kind(),
        }
    }
}

/// Signature of a per-field conversion hook.
pub type DecodeHook = fn(FieldKind, Value) -> Result<Converted, HookError>;

/// Default hook: exact-kind conversion into nullable field types.
pub fn null_decoder(kind: FieldKind, value: Value) -> Result<Converted, HookError> {
    match kind {
        FieldKind::Any => Ok(Converted::Raw(value)),
        FieldKind::StringList => string_list(value),
        FieldKind::String => match value {
            Value::String(s) => Ok(Converted::String(s)),
            other => Err(HookError::mismatch(kind, &other)),
        },
        FieldKind::Bool => match value {
            Value::Bool(b) => Ok(Converted::Bool(b)),
            other => Err(HookError::mismatch(kind, &other)),
        },
        FieldKind::Int8 => narrow(kind, &value).map(Converted::Int8),
        FieldKind::Int16 => narrow(kind, &value).map(Converted::Int16),
        FieldKind::Int32 => narrow(kind, &value).map(Converted::Int32),
        FieldKind::Int64 => integer(kind, &value).map(Converted::Int64),
        FieldKind::Float32 => match value {
            Value::Float32(f) => Ok(Converted::Float32(f)),
            Value::Float64(f) => narrow_float(f).map(Converted::Float32),
            other => Err(HookError::mismatch(kind, &other)),
        },
        FieldKind::Float64 => match value {
            Value::Float32(f) => Ok(Converted::Float64(f64::from(f))),
            Value::Float64(f) => Ok(Converted::Float64(f)),
            other => Err(HookError::mismatch(kind, &other)),
        },
        FieldKind::NullDuration => match value {
            Value::String(s) => Ok(Converted::NullDuration(NullDuration::from_text(&s)?)),
            other => Err(HookError::mismatch(kind, &other)),
        },
    }
}

fn string_list(value: Value) -> Result<Converted, HookError> {
    let Value::Seq(items) = value else {
        return Err(HookError::mismatch(FieldKind::StringList, &value));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(HookError::Element {
                index,
                error: Box::new(HookError::mismatch(FieldKind::String, &other)),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Converted::StringList)
}

/// Accepts only `int`-family sources; `uint64` and floats are mismatches.
fn integer(kind: FieldKind, value: &Value) -> Result<i64, HookError> {
    match value {
        Value::Int(_) | Value::Int8(_) | Value::Int16(_) | Value::Int32(_) | Value::Int64(_) => {
            value.as_i64().ok_or_else(|| HookError::mismatch(kind, value))
        }
        other => Err(HookError::mismatch(kind, other)),
    }
}

fn narrow<T: TryFrom<i64>>(kind: FieldKind, value: &Value) -> Result<T, HookError> {
    let n = integer(kind, value)?;
    T::try_from(n).map_err(|_| HookError::Overflow { value: n, kind })
}

/// Finite sources must stay finite; NaN and infinities pass through.
fn narrow_float(value: f64) -> Result<f32, HookError> {
    let narrowed = value as f32;
    if value.is_finite() && !narrowed.is_finite() {
        return Err(HookError::FloatOverflow {
            value,
            kind: FieldKind::Float32,
        });
    }
    Ok(narrowed)
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
