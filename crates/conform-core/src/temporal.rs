//! # Temporal Coercion — Lenient Date Parsing
//!
//! Strings validated with `asDate` are parsed leniently and re-emitted as a
//! canonical ISO-8601 UTC timestamp with millisecond precision and a `Z`
//! suffix (`2024-02-29T10:00:00.000Z`). Validated documents stay plain
//! `serde_json::Value` trees, so a coerced date is a normalized string
//! rather than a distinct runtime type.
//!
//! ## Accepted Inputs
//!
//! - RFC 3339 with any offset (`2024-02-29T10:00:00+02:00`), converted to UTC.
//!   The offset may also be written without a colon (`+0200`).
//! - RFC 2822 / HTTP dates (`Thu, 29 Feb 2024 10:00:00 GMT`).
//! - Date and time without offset (`2024-02-29T10:00:00`, `2024-02-29 10:00:00`,
//!   optional fractional seconds), interpreted as UTC.
//! - Date only (`2024-02-29`), month only (`2024-02`) or year only (`2024`),
//!   midnight UTC on the first day of the period.
//!
//! Everything else, including impossible calendar dates, is rejected.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::CoreError;

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a date string leniently into a UTC instant.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if no accepted format matches.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, CoreError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = calendar_date(s).and_then(|date| date.and_hms_opt(0, 0, 0)) {
        return Ok(midnight.and_utc());
    }

    Err(CoreError::InvalidDate(input.to_string()))
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, truncated periods starting on day one.
fn calendar_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    let digits = |part: &str| part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('-') {
        Some((year, month))
            if digits(year) && month.len() == 2 && month.bytes().all(|b| b.is_ascii_digit()) =>
        {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        None if digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse `input` and return its canonical ISO-8601 form.
///
/// Canonical output parses back to itself, so coercion is idempotent.
pub fn coerce_date(input: &str) -> Result<String, CoreError> {
    parse_date(input).map(|dt| to_iso8601(&dt))
}
