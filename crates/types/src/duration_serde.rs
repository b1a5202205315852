// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Serde helpers for writing a [`Duration`] as a bare nanosecond count.
//!
//! `Duration` itself always serializes to its text form. Use this module with
//! `#[serde(with = "nulltypes::duration_serde")]` on fields whose consumer
//! needs the numeric form instead. Deserialization accepts both forms.

use crate::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    duration.as_nanos().serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    Duration::deserialize(deserializer)
}
