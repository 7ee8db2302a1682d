//! # Error Model
//!
//! Validation distinguishes two families of failure:
//!
//! - **Field errors** — expected data-quality problems. They are collected
//!   into a [`FieldErrors`] batch across sibling keys and array items and
//!   surface as a single [`ValidationError::Fields`].
//! - **Usage errors** — a malformed schema, a misused entry point or a
//!   transform that rejected its input. They stop validation immediately
//!   and are never merged into a batch.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Error returned by the validator engine.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The data violated the schema; every violation of the call tree.
    #[error("field validation failed:\n{0}")]
    Fields(FieldErrors),

    /// The schema itself is malformed.
    #[error("invalid schema at '{field}': {reason}")]
    Schema {
        /// Field path of the offending schema node.
        field: String,
        /// What is wrong with the node.
        reason: String,
    },

    /// The engine entry point was called with unusable input.
    #[error("{0}")]
    Input(String),

    /// A parse or output transform rejected its input.
    #[error("transform failed at '{field}': {source}")]
    Transform {
        /// Field path being transformed.
        field: String,
        /// Underlying transform error.
        source: TransformError,
    },
}

impl ValidationError {
    /// The field errors, if this is a [`ValidationError::Fields`].
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ValidationError::Fields(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ValidationError {
    fn from(errors: FieldErrors) -> Self {
        ValidationError::Fields(errors)
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        ValidationError::Fields(FieldErrors::from(vec![error]))
    }
}

/// Raised by a [`crate::Transform`] that cannot handle its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransformError(pub String);

/// A single violation tied to a field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Dotted/bracketed path to the field (`server.listen[0].port`).
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The violation concerns the key name rather than its value.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_on_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_description: Option<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            is_on_key: false,
            human_key_name: None,
            field_description: None,
        }
    }

    pub fn with_human_key_name(mut self, name: Option<String>) -> Self {
        self.human_key_name = name;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.field_description = description;
        self
    }

    /// Mark the violation as concerning the key name.
    pub fn on_key(mut self) -> Self {
        self.is_on_key = true;
        self
    }
}

/// Renders as `field(humanKeyName): message`, or `field: message` when no
/// human key name is known.
impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.human_key_name {
            Some(name) => write!(f, "{}({}): {}", self.field, name, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Ordered collection of field errors raised together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Append another batch, preserving its order.
    pub fn append(&mut self, other: FieldErrors) {
        self.errors.extend(other.errors);
    }

    /// Field paths of all errors, in order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }
}

impl From<Vec<FieldError>> for FieldErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display_with_human_name() {
        let e = FieldError::new("server.port", "Must be number")
            .with_human_key_name(Some("Port".to_string()));
        assert_eq!(e.to_string(), "server.port(Port): Must be number");
    }

    #[test]
    fn test_field_error_display_without_human_name() {
        let e = FieldError::new("mode", "Must be string");
        assert_eq!(e.to_string(), "mode: Must be string");
    }

    #[test]
    fn test_field_errors_append_preserves_order() {
        let mut errors = FieldErrors::from(vec![FieldError::new("a", "x")]);
        errors.append(FieldErrors::from(vec![
            FieldError::new("b", "y"),
            FieldError::new("c", "z"),
        ]));
        assert_eq!(errors.fields(), vec!["a", "b", "c"]);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_field_error_serialization_is_camel_case() {
        let e = FieldError::new("tags.Bad", "Doesn't match validation RegExp").on_key();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["isOnKey"], true);
        assert!(json.get("humanKeyName").is_none());

        let plain = serde_json::to_value(FieldError::new("a", "b")).unwrap();
        assert!(plain.get("isOnKey").is_none());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::from(FieldError::new("a", "Must be boolean"));
        let display = err.to_string();
        assert!(display.contains("field validation failed"));
        assert!(display.contains("a: Must be boolean"));
        assert!(err.field_errors().is_some());
    }
}
