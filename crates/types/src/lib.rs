// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Value types for decoding loosely-typed configuration.
//!
//! - [`Duration`]: signed nanosecond span with a compact text form (`1m15s`)
//!   that decodes from JSON integers, JSON strings and plain text.
//! - [`NullDuration`]: a `Duration` with a presence flag, so `null` and
//!   `0s` stay distinct.
//! - [`Decoder`] and [`null_decoder`]: fill typed structs from parsed
//!   documents, with exact `expected '<kind>', got '<kind>'` errors.

pub mod decoder;
mod duration;
pub mod duration_serde;
pub mod hook;
mod null_duration;
mod value;

pub use decoder::{
    decode, Decode, DecodeError, Decoder, DecoderConfig, FieldError, FieldRef, Slot,
};
pub use duration::{Duration, DurationError};
pub use hook::{null_decoder, Converted, DecodeHook, FieldKind, HookError};
pub use null_duration::NullDuration;
pub use value::{Kind, Value};
