// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Signed nanosecond duration with a compact human-readable text form.
//!
//! The text grammar is a sequence of `<number><unit>` groups with an optional
//! leading sign, e.g. `10s`, `1m15s`, `-1.5h`, `300ms`. Units are `ns`, `us`
//! (or `µs`), `ms`, `s`, `m` and `h`.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;

/// Magnitude of `i64::MIN`, the largest absolute value a duration can hold.
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Fraction digits beyond this count cannot move the result by a nanosecond.
const MAX_FRACTION_DIGITS: u32 = 18;

/// Errors produced while parsing or converting a [`Duration`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {text:?}")]
    UnknownUnit { unit: String, text: String },

    #[error("duration out of range")]
    OutOfRange,

    #[error("negative duration {0} cannot be represented as std::time::Duration")]
    Negative(Duration),
}

/// A signed time span with nanosecond resolution.
///
/// Serializes as its text form (`"1m15s"`) and deserializes from either a
/// string in the same grammar or a bare integer count of nanoseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    pub const ZERO: Duration = Duration(0);
    pub const NANOSECOND: Duration = Duration(1);
    pub const MICROSECOND: Duration = Duration(NANOS_PER_MICRO as i64);
    pub const MILLISECOND: Duration = Duration(NANOS_PER_MILLI as i64);
    pub const SECOND: Duration = Duration(NANOS_PER_SEC as i64);
    pub const MINUTE: Duration = Duration(NANOS_PER_MIN as i64);
    pub const HOUR: Duration = Duration(NANOS_PER_HOUR as i64);
    pub const MAX: Duration = Duration(i64::MAX);
    pub const MIN: Duration = Duration(i64::MIN);

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn from_micros(micros: i64) -> Self {
        Self(micros.saturating_mul(NANOS_PER_MICRO as i64))
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(NANOS_PER_MILLI as i64))
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(NANOS_PER_SEC as i64))
    }

    pub const fn from_mins(mins: i64) -> Self {
        Self(mins.saturating_mul(NANOS_PER_MIN as i64))
    }

    pub const fn from_hours(hours: i64) -> Self {
        Self(hours.saturating_mul(NANOS_PER_HOUR as i64))
    }

    /// Total nanosecond count.
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC as f64
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Absolute value, saturating at [`Duration::MAX`].
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn checked_add(self, rhs: Duration) -> Option<Duration> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Duration) -> Option<Duration> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Parse the duration grammar strictly: the empty string is an error.
    pub fn parse(text: &str) -> Result<Self, DurationError> {
        parse_duration(text).map(Self)
    }

    /// Parse text input where an empty string stands for the zero duration.
    ///
    /// Used for environment variables and flag values, where an unset value
    /// arrives as an empty string.
    pub fn from_text(text: &str) -> Result<Self, DurationError> {
        if text.is_empty() {
            return Ok(Self::ZERO);
        }
        Self::parse(text)
    }

    /// Decode a raw JSON document holding an integer or a duration string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Parses `[-+]?([0-9]*(\.[0-9]*)?[a-zµμ]+)+` into signed nanoseconds.
fn parse_duration(orig: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(orig.to_string());

    let mut s = orig;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, rest) = leading_int(s).ok_or_else(invalid)?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut frac = None;
        if let Some(rest) = s.strip_prefix('.') {
            let (digits, scale, rest_after) = leading_fraction(rest);
            if rest_after.len() != rest.len() {
                frac = Some((digits, scale));
            }
            s = rest_after;
            if !has_whole && frac.is_none() {
                return Err(invalid());
            }
        } else if !has_whole {
            return Err(invalid());
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(orig.to_string()));
        }
        let (unit_text, rest) = s.split_at(unit_len);
        s = rest;

        let unit = unit_nanos(unit_text).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit_text.to_string(),
            text: orig.to_string(),
        })?;

        let mut group = whole.checked_mul(unit).ok_or_else(invalid)?;
        if group > MAX_MAGNITUDE {
            return Err(invalid());
        }
        if let Some((digits, scale)) = frac {
            let extra = (u128::from(digits) * u128::from(unit) / scale) as u64;
            group = group.checked_add(extra).ok_or_else(invalid)?;
            if group > MAX_MAGNITUDE {
                return Err(invalid());
            }
        }

        total = total.checked_add(group).ok_or_else(invalid)?;
        if total > MAX_MAGNITUDE {
            return Err(invalid());
        }
    }

    if negative {
        // total <= 2^63, so the negation always lands in range.
        return Ok((total as i64).wrapping_neg());
    }
    i64::try_from(total).map_err(|_| invalid())
}

/// Consumes leading ASCII digits. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
        if value > MAX_MAGNITUDE {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consumes fraction digits, returning `(digits, 10^count)` for the digits kept.
fn leading_fraction(s: &str) -> (u64, u128, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut digits: u64 = 0;
    let mut scale: u128 = 1;
    for (i, b) in s[..end].bytes().enumerate() {
        if i as u32 >= MAX_FRACTION_DIGITS {
            break;
        }
        digits = digits * 10 + u64::from(b - b'0');
        scale *= 10;
    }
    (digits, scale, &s[end..])
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        // U+00B5 micro sign and U+03BC greek small letter mu
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Renders `value / 10^digits` as `.ddd` with trailing zeros dropped.
fn fraction(value: u64, digits: usize) -> String {
    if value == 0 {
        return String::new();
    }
    let padded = format!("{value:0digits$}");
    format!(".{}", padded.trim_end_matches('0'))
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.unsigned_abs();
        if nanos == 0 {
            return f.write_str("0s");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }

        if nanos < NANOS_PER_SEC {
            let (scale, digits, unit) = if nanos < NANOS_PER_MICRO {
                (1, 0, "ns")
            } else if nanos < NANOS_PER_MILLI {
                (NANOS_PER_MICRO, 3, "µs")
            } else {
                (NANOS_PER_MILLI, 6, "ms")
            };
            return write!(
                f,
                "{}{}{unit}",
                nanos / scale,
                fraction(nanos % scale, digits)
            );
        }

        let secs = nanos / NANOS_PER_SEC;
        let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
        if hours > 0 {
            write!(f, "{hours}h{minutes}m")?;
        } else if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{seconds}{}s", fraction(nanos % NANOS_PER_SEC, 9))
    }
}

/// Text decoding; the empty string yields [`Duration::ZERO`].
impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a duration string or an integer number of nanoseconds")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Duration, E> {
        Ok(Duration(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Duration, E> {
        i64::try_from(v)
            .map(Duration)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
        Duration::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DurationVisitor)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration(self.0.saturating_neg())
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = DurationError;

    fn try_from(value: std::time::Duration) -> Result<Self, Self::Error> {
        i64::try_from(value.as_nanos())
            .map(Duration)
            .map_err(|_| DurationError::OutOfRange)
    }
}

impl TryFrom<Duration> for std::time::Duration {
    type Error = DurationError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        u64::try_from(value.0)
            .map(std::time::Duration::from_nanos)
            .map_err(|_| DurationError::Negative(value))
    }
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
