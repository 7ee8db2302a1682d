//! # Transforms
//!
//! Functions applied to a value before type dispatch (`parseTransform`) or to
//! the validated output (`outputTransform`).
//!
//! In serialized schemas a transform is referenced by the name of a built-in:
//!
//! | Name | Input | Output |
//! |---|---|---|
//! | `toFloat` | string | leading decimal number, or null when there is none |
//! | `toInteger` | string | leading integer, or null when there is none |
//! | `toDate` | string | canonical ISO-8601 UTC timestamp string |
//! | `upper` / `lower` / `capitalize` | string | recased string |
//!
//! A built-in given a non-string input fails with a [`TransformError`],
//! which aborts validation. Programmatic schemas may carry arbitrary
//! closures through [`Transform::custom`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use conform_core::{temporal, text};

use crate::error::TransformError;

type TransformFn = dyn Fn(Value) -> Result<Value, TransformError> + Send + Sync;

/// A named value transformation.
#[derive(Clone)]
pub struct Transform {
    name: String,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Wrap a closure under `name`.
    ///
    /// A custom transform serializes as its name but cannot be deserialized
    /// unless the name is also a built-in.
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Look up a built-in transform by name.
    pub fn builtin(name: &str) -> Option<Self> {
        let func: fn(Value) -> Result<Value, TransformError> = match name {
            "toFloat" => to_float,
            "toInteger" => to_integer,
            "toDate" => to_date,
            "upper" => |v| map_string("upper", v, text::to_upper),
            "lower" => |v| map_string("lower", v, text::to_lower),
            "capitalize" => |v| map_string("capitalize", v, text::capitalize),
            _ => return None,
        };
        Some(Self::custom(name, func))
    }

    /// Names accepted by [`Transform::builtin`].
    pub fn builtin_names() -> &'static [&'static str] {
        &["toFloat", "toInteger", "toDate", "upper", "lower", "capitalize"]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: Value) -> Result<Value, TransformError> {
        (self.func)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name).finish()
    }
}

impl Serialize for Transform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Transform::builtin(&name).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown transform {name:?}, expected one of {:?}",
                Transform::builtin_names()
            ))
        })
    }
}

fn require_string(transform: &str, value: Value) -> Result<String, TransformError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(TransformError(format!(
            "Input of {transform} is not string"
        ))),
    }
}

fn map_string(transform: &str, value: Value, f: fn(&str) -> String) -> Result<Value, TransformError> {
    let s = require_string(transform, value)?;
    Ok(Value::String(f(&s)))
}

fn scan_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

fn scan_sign(bytes: &[u8], pos: usize) -> usize {
    match bytes.get(pos) {
        Some(b'+') | Some(b'-') => pos + 1,
        _ => pos,
    }
}

/// Longest prefix of `s` that reads as a decimal number with optional
/// fraction and exponent.
fn float_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let start = scan_sign(bytes, 0);
    let int_end = scan_digits(bytes, start);
    let mut end = int_end;
    let mut has_digits = int_end > start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = scan_digits(bytes, end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_start = scan_sign(bytes, end + 1);
        let exp_end = scan_digits(bytes, exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    Some(&s[..end])
}

/// Longest prefix of `s` that reads as a signed base-10 integer.
fn integer_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let start = scan_sign(bytes, 0);
    let end = scan_digits(bytes, start);
    (end > start).then(|| &s[..end])
}

/// Leading decimal number of a string; null when the string has none.
fn to_float(value: Value) -> Result<Value, TransformError> {
    let s = require_string("toFloat", value)?;
    let parsed = float_prefix(s.trim_start())
        .and_then(|digits| digits.parse::<f64>().ok())
        .and_then(Number::from_f64);
    Ok(parsed.map(Value::Number).unwrap_or(Value::Null))
}

/// Leading base-10 integer of a string; null when the string has none.
fn to_integer(value: Value) -> Result<Value, TransformError> {
    let s = require_string("toInteger", value)?;
    let Some(digits) = integer_prefix(s.trim_start()) else {
        return Ok(Value::Null);
    };
    if let Ok(n) = digits.parse::<i64>() {
        return Ok(Value::from(n));
    }
    // Out of i64 range: keep the magnitude as a float.
    Ok(digits
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null))
}

fn to_date(value: Value) -> Result<Value, TransformError> {
    let s = require_string("toDate", value)?;
    temporal::coerce_date(&s)
        .map(Value::String)
        .map_err(|e| TransformError(e.to_string()))
}
