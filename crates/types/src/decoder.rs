// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural decoding of a loosely-typed map into a typed struct.
//!
//! A destination type implements [`Decode`] by listing its fields as
//! [`Slot`]s. The [`Decoder`] matches each slot to an input key (exact name
//! first, then ASCII case-insensitive), runs the configured hook, and assigns
//! the result. Field failures are collected into a single [`DecodeError`].

use crate::hook::{null_decoder, Converted, DecodeHook, FieldKind, HookError};
use crate::null_duration::NullDuration;
use crate::value::{Kind, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, trace};

/// A single entry of an aggregate decode failure.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("error decoding '{name}': {error}")]
    Field { name: String, error: HookError },

    #[error("'' has invalid keys: {}", .0.join(", "))]
    UnusedKeys(Vec<String>),
}

impl FieldError {
    /// Attribute a hook error to a field, descending into sequence elements.
    pub fn new(name: &str, error: HookError) -> Self {
        match error {
            HookError::Element { index, error } => {
                Self::new(&format!("{name}[{index}]"), *error)
            }
            error => Self::Field {
                name: name.to_string(),
                error,
            },
        }
    }
}

/// Errors returned by [`Decoder::decode`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("'' expected a map, got '{0}'")]
    NotAMap(Kind),

    #[error("{}", render_aggregate(.0))]
    Fields(Vec<FieldError>),
}

impl DecodeError {
    /// The individual field errors, empty for [`DecodeError::NotAMap`].
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::NotAMap(_) => &[],
            Self::Fields(errors) => errors,
        }
    }
}

fn render_aggregate(errors: &[FieldError]) -> String {
    let mut points: Vec<String> = errors.iter().map(|e| format!("* {e}")).collect();
    points.sort();
    format!("{} error(s) decoding:\n\n{}", errors.len(), points.join("\n"))
}

/// Mutable reference to a typed destination field.
#[derive(Debug)]
pub enum FieldRef<'a> {
    StringList(&'a mut Vec<String>),
    String(&'a mut Option<String>),
    Bool(&'a mut Option<bool>),
    Int8(&'a mut Option<i8>),
    Int16(&'a mut Option<i16>),
    Int32(&'a mut Option<i32>),
    Int64(&'a mut Option<i64>),
    Float32(&'a mut Option<f32>),
    Float64(&'a mut Option<f64>),
    NullDuration(&'a mut NullDuration),
    Any(&'a mut Value),
}

impl FieldRef<'_> {
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
            Self::Any(_) => FieldKind::Any,
        }
    }

    /// Store a converted value. The field is untouched on error.
    pub fn assign(self, value: Converted) -> Result<(), HookError> {
        match (self, value) {
            (Self::StringList(field), Converted::StringList(v)) => *field = v,
            (Self::String(field), Converted::String(v)) => *field = Some(v),
            (Self::Bool(field), Converted::Bool(v)) => *field = Some(v),
            (Self::Int8(field), Converted::Int8(v)) => *field = Some(v),
            (Self::Int16(field), Converted::Int16(v)) => *field = Some(v),
            (Self::Int32(field), Converted::Int32(v)) => *field = Some(v),
            (Self::Int64(field), Converted::Int64(v)) => *field = Some(v),
            (Self::Float32(field), Converted::Float32(v)) => *field = Some(v),
            (Self::Float64(field), Converted::Float64(v)) => *field = Some(v),
            (Self::NullDuration(field), Converted::NullDuration(v)) => *field = v,
            (Self::Any(field), Converted::Raw(v)) => *field = v,
            (field, value) => {
                return Err(HookError::UnexpectedConversion {
                    expected: field.kind(),
                    produced: value.kind(),
                })
            }
        }
        Ok(())
    }
}

macro_rules! field_ref_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for FieldRef<'a> {
                fn from(field: &'a mut $ty) -> Self {
                    Self::$variant(field)
                }
            }
        )*
    };
}

field_ref_from! {
    Vec<String> => StringList,
    Option<String> => String,
    Option<bool> => Bool,
    Option<i8> => Int8,
    Option<i16> => Int16,
    Option<i32> => Int32,
    Option<i64> => Int64,
    Option<f32> => Float32,
    Option<f64> => Float64,
    NullDuration => NullDuration,
    Value => Any,
}

/// A named destination field.
#[derive(Debug)]
pub struct Slot<'a> {
    pub name: &'static str,
    pub field: FieldRef<'a>,
}

impl<'a> Slot<'a> {
    pub fn new(name: &'static str, field: impl Into<FieldRef<'a>>) -> Self {
        Self {
            name,
            field: field.into(),
        }
    }
}

/// A struct that can be filled by a [`Decoder`].
pub trait Decode {
    /// The decodable fields of `self`, in declaration order.
    fn slots(&mut self) -> Vec<Slot<'_>>;
}

/// Options for a [`Decoder`].
#[derive(Clone, Debug)]
pub struct DecoderConfig {
    /// Conversion applied to every matched field
    pub hook: DecodeHook,

    /// Report input keys that match no field
    pub error_unused: bool,

    /// Accept a single string where a string list is declared
    pub weak_list_promotion: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            hook: null_decoder,
            error_unused: false,
            weak_list_promotion: false,
        }
    }
}

impl DecoderConfig {
    pub fn with_hook(mut self, hook: DecodeHook) -> Self {
        self.hook = hook;
        self
    }

    pub fn with_error_unused(mut self, error_unused: bool) -> Self {
        self.error_unused = error_unused;
        self
    }

    pub fn with_weak_list_promotion(mut self, promote: bool) -> Self {
        self.weak_list_promotion = promote;
        self
    }
}

/// Fills [`Decode`] structs from loosely-typed maps.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `input` into `target`.
    ///
    /// A `null` input or a `null` field value leaves the target untouched.
    /// Fields that convert are assigned even when other fields fail.
    pub fn decode<T: Decode + ?Sized>(
        &self,
        target: &mut T,
        input: Value,
    ) -> Result<(), DecodeError> {
        let mut input = match input {
            Value::Map(map) => map,
            Value::Null => return Ok(()),
            other => return Err(DecodeError::NotAMap(other.kind())),
        };

        let mut errors = Vec::new();
        for slot in target.slots() {
            let Some(value) = take_field(&mut input, slot.name) else {
                continue;
            };
            if value.is_null() {
                continue;
            }

            let kind = slot.field.kind();
            let promote = kind == FieldKind::StringList && self.config.weak_list_promotion;
            let value = match value {
                Value::String(s) if promote => Value::Seq(vec![Value::String(s)]),
                value => value,
            };

            trace!(field = slot.name, %kind, source = %value.kind(), "decoding field");
            let result = (self.config.hook)(kind, value)
                .and_then(|converted| slot.field.assign(converted));
            if let Err(error) = result {
                errors.push(FieldError::new(slot.name, error));
            }
        }

        if self.config.error_unused && !input.is_empty() {
            errors.push(FieldError::UnusedKeys(input.into_keys().collect()));
        }

        if errors.is_empty() {
            return Ok(());
        }
        debug!(count = errors.len(), "decode failed");
        Err(DecodeError::Fields(errors))
    }
}

/// Remove the entry for `name`, preferring an exact key over a case-folded one.
fn take_field(input: &mut BTreeMap<String, Value>, name: &str) -> Option<Value> {
    if let Some(value) = input.remove(name) {
        return Some(value);
    }
    let key = input.keys().find(|k| k.eq_ignore_ascii_case(name))?.clone();
    input.remove(&key)
}

/// Decode with the default configuration.
pub fn decode<T: Decode + ?Sized>(target: &mut T, input: Value) -> Result<(), DecodeError> {
    Decoder::default().decode(target, input)
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
