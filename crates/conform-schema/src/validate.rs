//! # Validator Engine
//!
//! Recursive validation and transformation of a `serde_json::Value` against
//! a [`SchemaNode`].
//!
//! ## Algorithm
//!
//! For every node:
//!
//! 1. A null value on a `nullable` node yields null immediately.
//! 2. The `parseTransform`, if any, replaces the input.
//! 3. The kind-specific validator runs and produces the output value.
//! 4. The `outputTransform`, if any, replaces the output.
//!
//! ## Error Accumulation
//!
//! Scalar validators stop at their first violation. Objects and arrays
//! harvest the [`FieldErrors`] of every child and keep going, so one call
//! reports every violation in the tree, ordered by key declaration and
//! array index. Any other [`ValidationError`] (malformed schema, failing
//! transform) aborts the whole call unchanged.
//!
//! Array length bounds are checked before the elements and fail fast;
//! uniqueness violations and element violations share one batch.
//!
//! ## Output
//!
//! Objects are rebuilt from the validated keys only, arrays from the
//! validated elements, so transforms and date coercion apply at every depth.

use serde_json::{Map, Value};

use conform_core::{array, kind, temporal};

use crate::error::{FieldError, FieldErrors, ValidationError};
use crate::node::{
    join_field, AdditionalProperties, ArrayRules, Childs, EnumRules, NumberRules, ObjectRules,
    Pattern, SchemaKind, SchemaNode, StringRules,
};

/// Validate `content` against `node`, reporting fields relative to the root.
///
/// # Errors
///
/// Returns `ValidationError::Fields` with every violation found, or the
/// first usage error encountered.
pub fn validate(content: &Value, node: &SchemaNode) -> Result<Value, ValidationError> {
    validate_field(content, node, "")
}

/// Validate `content` as the value of `key` under `parent_key`.
///
/// Field paths in errors are `parent_key` followed by `key`; pass a parent
/// ending in `.` (or empty) for object keys and a `[n]` key for items.
pub fn validate_at(
    content: &Value,
    node: &SchemaNode,
    parent_key: &str,
    key: &str,
) -> Result<Value, ValidationError> {
    validate_field(content, node, &format!("{parent_key}{key}"))
}

/// Validate a top-level object document against a set of declared keys.
///
/// # Errors
///
/// Returns `ValidationError::Input` when `input` is null or not an object;
/// these are caller mistakes and never appear as field errors.
pub fn object_validator(
    input: &Value,
    childs: &Childs,
    additional_properties: AdditionalProperties,
) -> Result<Value, ValidationError> {
    if input.is_null() {
        return Err(ValidationError::Input("Object is empty".to_string()));
    }
    if !kind::is_object(input) {
        return Err(ValidationError::Input("Input is not object".to_string()));
    }

    let shape = ObjectShape {
        childs: Some(childs),
        of: None,
        keys_regexp: None,
        additional_properties,
    };
    validate_object(input, &shape, &Meta::default(), "")
}

/// Error metadata taken from the node being validated.
#[derive(Default)]
struct Meta<'a> {
    human_key_name: Option<&'a String>,
    description: Option<&'a String>,
}

impl<'a> From<&'a SchemaNode> for Meta<'a> {
    fn from(node: &'a SchemaNode) -> Self {
        Self {
            human_key_name: node.human_key_name.as_ref(),
            description: node.description.as_ref(),
        }
    }
}

impl Meta<'_> {
    fn error(&self, field: &str, message: impl Into<String>) -> FieldError {
        FieldError::new(field, message)
            .with_human_key_name(self.human_key_name.cloned())
            .with_description(self.description.cloned())
    }

    fn reject(&self, field: &str, message: impl Into<String>) -> ValidationError {
        ValidationError::from(self.error(field, message))
    }
}

/// Borrowed view of the object refinements, shared by nested objects and
/// the top-level [`object_validator`].
struct ObjectShape<'a> {
    childs: Option<&'a Childs>,
    of: Option<&'a SchemaNode>,
    keys_regexp: Option<&'a Pattern>,
    additional_properties: AdditionalProperties,
}

impl<'a> From<&'a ObjectRules> for ObjectShape<'a> {
    fn from(rules: &'a ObjectRules) -> Self {
        Self {
            childs: rules.childs.as_ref(),
            of: rules.of.as_deref(),
            keys_regexp: rules.keys_regexp.as_ref(),
            additional_properties: rules.additional_properties,
        }
    }
}

fn validate_field(content: &Value, node: &SchemaNode, field: &str) -> Result<Value, ValidationError> {
    if content.is_null() && node.nullable {
        return Ok(Value::Null);
    }

    let parsed;
    let content = match &node.parse_transform {
        Some(transform) => {
            parsed = transform
                .apply(content.clone())
                .map_err(|source| ValidationError::Transform {
                    field: field.to_string(),
                    source,
                })?;
            &parsed
        }
        None => content,
    };

    let meta = Meta::from(node);
    let output = match &node.kind {
        SchemaKind::Any => content.clone(),
        SchemaKind::Boolean => validate_boolean(content, &meta, field)?,
        SchemaKind::Number(rules) => validate_number(content, rules, &meta, field)?,
        SchemaKind::String(rules) => validate_string(content, rules, &meta, field)?,
        SchemaKind::Enum(rules) => validate_enum(content, rules, &meta, field)?,
        SchemaKind::Array(rules) => validate_array(content, rules, &meta, field)?,
        SchemaKind::Object(rules) => {
            validate_object(content, &ObjectShape::from(rules), &meta, field)?
        }
    };

    match &node.output_transform {
        Some(transform) => transform
            .apply(output)
            .map_err(|source| ValidationError::Transform {
                field: field.to_string(),
                source,
            }),
        None => Ok(output),
    }
}

fn validate_boolean(content: &Value, meta: &Meta<'_>, field: &str) -> Result<Value, ValidationError> {
    if kind::is_boolean(content) {
        Ok(content.clone())
    } else {
        Err(meta.reject(field, "Must be boolean"))
    }
}

fn validate_string(
    content: &Value,
    rules: &StringRules,
    meta: &Meta<'_>,
    field: &str,
) -> Result<Value, ValidationError> {
    let Some(s) = content.as_str() else {
        return Err(meta.reject(field, "Must be string"));
    };

    let length = s.chars().count();
    if let Some(min) = rules.min_length {
        if length < min {
            return Err(meta.reject(field, format!("Minimal length is {min}")));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            return Err(meta.reject(field, format!("Maximal length is {max}")));
        }
    }

    // The pattern must match before any date coercion is attempted.
    if let Some(pattern) = &rules.regexp {
        if !pattern.is_match(s) {
            return Err(meta.reject(field, pattern.message()));
        }
    }

    if rules.as_date {
        return temporal::coerce_date(s)
            .map(Value::String)
            .map_err(|_| meta.reject(field, "Invalid date value"));
    }
    Ok(content.clone())
}

fn validate_number(
    content: &Value,
    rules: &NumberRules,
    meta: &Meta<'_>,
    field: &str,
) -> Result<Value, ValidationError> {
    let Some(n) = content.as_f64() else {
        return Err(meta.reject(field, "Must be number"));
    };

    if let Some(min) = rules.min {
        if n < min {
            return Err(meta.reject(field, format!("Minimal value is {min}")));
        }
    }
    if let Some(max) = rules.max {
        if n > max {
            return Err(meta.reject(field, format!("Maximal value is {max}")));
        }
    }
    if rules.as_integer && !kind::is_integer(content) {
        return Err(meta.reject(field, "Must be integer, not float"));
    }
    Ok(content.clone())
}

fn validate_enum(
    content: &Value,
    rules: &EnumRules,
    meta: &Meta<'_>,
    field: &str,
) -> Result<Value, ValidationError> {
    if rules.values.is_empty() {
        return Err(ValidationError::Schema {
            field: field.to_string(),
            reason: "missing 'enum' values".to_string(),
        });
    }

    match content.as_str() {
        Some(s) if rules.values.iter().any(|v| v == s) => Ok(content.clone()),
        _ => Err(meta.reject(
            field,
            format!("Must be one of following values [{}]", rules.values.join(",")),
        )),
    }
}

fn validate_array(
    content: &Value,
    rules: &ArrayRules,
    meta: &Meta<'_>,
    field: &str,
) -> Result<Value, ValidationError> {
    let Some(items) = content.as_array() else {
        return Err(meta.reject(field, "Must be array"));
    };

    if let Some(min) = rules.min_length {
        if items.len() < min {
            return Err(meta.reject(field, format!("Must have minimal length of {min} items")));
        }
    }
    if let Some(max) = rules.max_length {
        if items.len() > max {
            return Err(meta.reject(field, format!("Must have maximal length of {max} items")));
        }
    }

    let mut errors = FieldErrors::new();

    if let Some(unique) = &rules.unique {
        for index in array::find_duplicates(items, unique) {
            let duplicate_field = if unique.is_empty() {
                format!("{field}[{index}]")
            } else {
                format!("{field}[{index}].{unique}")
            };
            errors.push(
                FieldError::new(duplicate_field, "Items must be unique")
                    .with_human_key_name(meta.human_key_name.cloned()),
            );
        }
    }

    let mut output = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match validate_field(item, &rules.of, &format!("{field}[{index}]")) {
            Ok(value) => output.push(value),
            Err(ValidationError::Fields(child_errors)) => errors.append(child_errors),
            Err(other) => return Err(other),
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError::Fields(errors));
    }
    Ok(Value::Array(output))
}

fn validate_object(
    content: &Value,
    shape: &ObjectShape<'_>,
    meta: &Meta<'_>,
    field: &str,
) -> Result<Value, ValidationError> {
    if shape.childs.is_none() && shape.of.is_none() {
        return Err(ValidationError::Schema {
            field: field.to_string(),
            reason: "missing 'childs' or 'of'".to_string(),
        });
    }

    let Some(input) = content.as_object() else {
        return Err(meta.reject(field, "Must be object"));
    };

    // Declared keys in declaration order; otherwise every input key.
    let entries: Vec<(&str, &SchemaNode)> = match (shape.childs, shape.of) {
        (Some(childs), _) => childs.iter().map(|(k, n)| (k.as_str(), n)).collect(),
        (None, Some(of)) => input.keys().map(|k| (k.as_str(), of)).collect(),
        (None, None) => Vec::new(),
    };

    let mut output = Map::new();
    let mut errors = FieldErrors::new();

    for (key, child) in entries {
        let child_field = join_field(field, key);

        if let Some(pattern) = shape.keys_regexp {
            if !pattern.is_match(key) {
                errors.push(
                    FieldError::new(child_field, pattern.message())
                        .with_description(meta.description.cloned())
                        .on_key(),
                );
                continue;
            }
        }

        match input.get(key) {
            Some(value) => match validate_field(value, child, &child_field) {
                Ok(validated) => {
                    output.insert(key.to_string(), validated);
                }
                Err(ValidationError::Fields(child_errors)) => errors.append(child_errors),
                Err(other) => return Err(other),
            },
            None if child.required => {
                errors.push(meta.error(&child_field, "Missing required field"));
            }
            None => {}
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError::Fields(errors));
    }

    if shape.additional_properties == AdditionalProperties::Reject {
        let input_keys: Vec<&String> = input.keys().collect();
        let output_keys: Vec<&String> = output.keys().collect();
        let extra = array::difference(&input_keys, &output_keys);
        if !extra.is_empty() {
            let errors: Vec<FieldError> = extra
                .into_iter()
                .map(|key| meta.error(&join_field(field, key), "Additional keys is not allowed"))
                .collect();
            return Err(ValidationError::Fields(FieldErrors::from(errors)));
        }
    }

    Ok(Value::Object(output))
}
