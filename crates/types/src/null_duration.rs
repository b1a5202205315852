// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Optional duration that keeps "absent" apart from "zero".

use crate::duration::{Duration, DurationError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A [`Duration`] paired with a presence flag.
///
/// When `valid` is false the stored duration carries no meaning; read it
/// through [`NullDuration::as_option`] or [`NullDuration::value_or`].
/// Serializes to `null` when absent. Equality and hashing also ignore the
/// stored duration of an absent value.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDuration {
    pub duration: Duration,
    pub valid: bool,
}

impl NullDuration {
    pub const fn new(duration: Duration, valid: bool) -> Self {
        Self { duration, valid }
    }

    /// A present duration.
    pub const fn from_duration(duration: Duration) -> Self {
        Self::new(duration, true)
    }

    /// The absent value.
    pub const fn null() -> Self {
        Self::new(Duration::ZERO, false)
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn as_option(&self) -> Option<Duration> {
        self.valid.then_some(self.duration)
    }

    pub fn value_or(&self, default: Duration) -> Duration {
        self.as_option().unwrap_or(default)
    }

    /// Parse text input; the empty string yields the absent value.
    pub fn from_text(text: &str) -> Result<Self, DurationError> {
        if text.is_empty() {
            return Ok(Self::null());
        }
        Duration::parse(text).map(Self::from_duration)
    }

    /// Replace this value from text input.
    ///
    /// On error the receiver is left absent.
    pub fn set_text(&mut self, text: &str) -> Result<(), DurationError> {
        match Self::from_text(text) {
            Ok(parsed) => {
                *self = parsed;
                Ok(())
            }
            Err(err) => {
                *self = Self::null();
                Err(err)
            }
        }
    }

    /// Decode a raw JSON document: `null`, an integer, or a duration string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Replace this value from a raw JSON document.
    ///
    /// On error the receiver is left absent.
    pub fn set_json(&mut self, raw: &str) -> Result<(), serde_json::Error> {
        match Self::from_json(raw) {
            Ok(parsed) => {
                *self = parsed;
                Ok(())
            }
            Err(err) => {
                *self = Self::null();
                Err(err)
            }
        }
    }
}

impl PartialEq for NullDuration {
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl Eq for NullDuration {}

impl Hash for NullDuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option().hash(state);
    }
}

impl From<Duration> for NullDuration {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}

impl From<Option<Duration>> for NullDuration {
    fn from(duration: Option<Duration>) -> Self {
        duration.map_or_else(Self::null, Self::from_duration)
    }
}

impl From<NullDuration> for Option<Duration> {
    fn from(value: NullDuration) -> Self {
        value.as_option()
    }
}

/// Renders the duration, or nothing when absent.
impl fmt::Display for NullDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(duration) => fmt::Display::fmt(&duration, f),
            None => Ok(()),
        }
    }
}

impl FromStr for NullDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl Serialize for NullDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_option() {
            Some(duration) => duration.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Duration>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
#[path = "null_duration_tests.rs"]
mod tests;
