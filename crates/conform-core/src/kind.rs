//! # Type-Check Predicates
//!
//! Total, side-effect-free predicates over the runtime classification of a
//! `serde_json::Value`. Absence is modelled as `Option::None`, so
//! [`is_undefined`] and [`is_set`] take `Option<&Value>`.
//!
//! Functions and regular expressions never appear inside data; schema
//! positions that hold them are typed (`Transform`, `Pattern` in
//! `conform-schema`), so there is no runtime predicate for either.

use std::fmt;

use serde_json::Value;

use crate::temporal::parse_date;

/// Runtime classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Returns `true` for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Key-value mapping (arrays are not objects here).
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

/// `serde_json` cannot hold NaN, so every number passes.
pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

pub fn is_null(value: &Value) -> bool {
    value.is_null()
}

/// A string holding a date accepted by [`parse_date`].
pub fn is_date(value: &Value) -> bool {
    value.as_str().is_some_and(|s| parse_date(s).is_ok())
}

/// Integral number, including floats with no fractional part (`5.0`).
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// The value is absent.
pub fn is_undefined(value: Option<&Value>) -> bool {
    value.is_none()
}

/// The value is present and not null.
pub fn is_set(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Kind::of(&json!(null)), Kind::Null);
        assert_eq!(Kind::of(&json!(true)), Kind::Boolean);
        assert_eq!(Kind::of(&json!(1.5)), Kind::Number);
        assert_eq!(Kind::of(&json!("x")), Kind::String);
        assert_eq!(Kind::of(&json!([1])), Kind::Array);
        assert_eq!(Kind::of(&json!({"a": 1})), Kind::Object);
        assert!(Kind::Array.is_container());
        assert!(!Kind::String.is_container());
    }

    #[test]
    fn test_object_excludes_array() {
        assert!(is_object(&json!({})));
        assert!(!is_object(&json!([])));
        assert!(!is_object(&json!(null)));
        assert!(is_array(&json!([])));
    }

    #[test]
    fn test_is_set_and_undefined() {
        let null = json!(null);
        let zero = json!(0);
        assert!(is_undefined(None));
        assert!(!is_undefined(Some(&null)));
        assert!(!is_set(None));
        assert!(!is_set(Some(&null)));
        assert!(is_set(Some(&zero)));
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer(&json!(5)));
        assert!(is_integer(&json!(5.0)));
        assert!(is_integer(&json!(-3)));
        assert!(!is_integer(&json!(5.5)));
        assert!(!is_integer(&json!("5")));
    }

    #[test]
    fn test_is_date() {
        assert!(is_date(&json!("2024-02-29")));
        assert!(is_date(&json!("2024-02-29T10:00:00Z")));
        assert!(!is_date(&json!("yesterday")));
        assert!(!is_date(&json!(1700000000)));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Object.to_string(), "object");
        assert_eq!(Kind::Null.to_string(), "null");
    }
}
