//! Parsing and display of timer durations.
//!
//! The accepted format is the one people already type for Go programs:
//! a sequence of decimal numbers, each with an optional fraction and a
//! unit suffix, such as `"10s"`, `"5m"`, `"1h30m"` or `"1.5h"`. Valid units
//! are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
//!
//! Timers only make sense for a positive length, so zero and negative
//! results are rejected alongside malformed text.
//!
//! ```rust
//! use bubbletea_countdown::duration::{format_duration, parse};
//! use std::time::Duration;
//!
//! assert_eq!(parse("1h30m").unwrap(), Duration::from_secs(90 * 60));
//! assert!(parse("0s").is_err());
//! assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
//! ```

use std::fmt;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

// Same ceiling as Go's time.Duration.
const MAX_NANOS: u128 = i64::MAX as u128;

/// Why a duration string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// Nothing but whitespace was entered.
    Empty,
    /// The text is not a sequence of `<number><unit>` pairs.
    Invalid(String),
    /// A number was not followed by a unit.
    MissingUnit(String),
    /// A unit suffix is not one of the known units.
    UnknownUnit(String),
    /// The total does not fit in a duration.
    Overflow(String),
    /// The total is zero or negative.
    NotPositive,
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationError::Empty => write!(f, "duration is empty"),
            DurationError::Invalid(s) => write!(f, "invalid duration {s:?}"),
            DurationError::MissingUnit(s) => write!(f, "missing unit in duration {s:?}"),
            DurationError::UnknownUnit(u) => write!(f, "unknown unit {u:?} in duration"),
            DurationError::Overflow(s) => write!(f, "duration {s:?} is too long"),
            DurationError::NotPositive => write!(f, "duration must be greater than zero"),
        }
    }
}

impl std::error::Error for DurationError {}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3600 * NANOS_PER_SEC,
        _ => return None,
    };
    Some(nanos)
}

/// Splits the leading run of ASCII digits off `s`.
fn leading_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses a duration string into a strictly positive [`Duration`].
pub fn parse(text: &str) -> Result<Duration, DurationError> {
    let orig = text.trim();
    if orig.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut s = orig;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    // A bare zero is the one number allowed without a unit.
    if s == "0" {
        return Err(DurationError::NotPositive);
    }
    if s.is_empty() {
        return Err(DurationError::Invalid(orig.to_string()));
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let (int_part, rest) = leading_digits(s);
        s = rest;

        let mut frac_part = "";
        if let Some(rest) = s.strip_prefix('.') {
            let (digits, rest) = leading_digits(rest);
            frac_part = digits;
            s = rest;
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DurationError::Invalid(orig.to_string()));
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        let (unit, rest) = s.split_at(unit_end);
        s = rest;
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(orig.to_string()));
        }
        let per_unit =
            unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| DurationError::Overflow(orig.to_string()))?
        };
        let mut nanos = whole
            .checked_mul(per_unit)
            .ok_or_else(|| DurationError::Overflow(orig.to_string()))?;

        // Digits past nanosecond precision cannot change the result.
        let frac_digits = &frac_part[..frac_part.len().min(18)];
        if !frac_digits.is_empty() {
            let frac: u128 = frac_digits
                .parse()
                .map_err(|_| DurationError::Invalid(orig.to_string()))?;
            let scale = 10u128.pow(frac_digits.len() as u32);
            nanos = nanos
                .checked_add(frac * per_unit / scale)
                .ok_or_else(|| DurationError::Overflow(orig.to_string()))?;
        }

        total = total
            .checked_add(nanos)
            .filter(|&t| t <= MAX_NANOS)
            .ok_or_else(|| DurationError::Overflow(orig.to_string()))?;
    }

    if negative || total == 0 {
        return Err(DurationError::NotPositive);
    }

    let secs = (total / NANOS_PER_SEC) as u64;
    let sub_nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, sub_nanos))
}

/// Formats a duration rounded to whole seconds, e.g. `"1h30m0s"`, `"2m5s"`,
/// `"9s"`. Halves round up.
pub fn format_duration(d: Duration) -> String {
    let mut secs = d.as_secs();
    if d.subsec_nanos() >= 500_000_000 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
