//! # Schema Nodes
//!
//! A [`SchemaNode`] describes the expected shape of one value position.
//! Kind-specific refinements live in the [`SchemaKind`] variant, so a node
//! cannot carry, say, `asInteger` on a string.
//!
//! ## Serialized Form
//!
//! Nodes (de)serialize as flat maps keyed by `type`, with camelCase
//! refinement names matching the schema documents users write:
//!
//! ```yaml
//! type: Array
//! required: true
//! unique: name
//! of:
//!   type: Object
//!   additionalProperties: Reject
//!   childs:
//!     name: { type: String, regexp: { pattern: "^[a-z]+$", message: "Lowercase only" } }
//!     since: { type: String, asDate: true, nullable: true }
//! ```
//!
//! `Password` is accepted as an alias of `String`.

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::transform::Transform;

/// Ordered map of object keys to child schemas, in declaration order.
pub type Childs = IndexMap<String, SchemaNode>;

const DEFAULT_PATTERN_MESSAGE: &str = "Doesn't match validation RegExp";

fn is_false(value: &bool) -> bool {
    !*value
}

/// Validation rules for one value position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Kind tag plus kind-specific refinements.
    #[serde(flatten)]
    pub kind: SchemaKind,

    /// An object key with this schema must be present.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// A literal null is accepted as-is, skipping every other check.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,

    /// Human-readable name reported with field errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_key_name: Option<String>,

    /// Free-form description reported with field errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Applied to the raw input before type dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_transform: Option<Transform>,

    /// Applied to the validated output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_transform: Option<Transform>,
}

/// The closed set of value kinds, each with its own refinements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SchemaKind {
    Any,
    Boolean,
    Number(NumberRules),
    #[serde(alias = "Password")]
    String(StringRules),
    Enum(EnumRules),
    Array(ArrayRules),
    Object(ObjectRules),
}

/// Fieldless tag of a [`SchemaKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaType {
    Any,
    Boolean,
    Number,
    String,
    Enum,
    Array,
    Object,
}

impl SchemaType {
    /// Kinds that terminate leaf-key enumeration by default.
    pub const SCALARS: [SchemaType; 5] = [
        SchemaType::Any,
        SchemaType::Boolean,
        SchemaType::Number,
        SchemaType::String,
        SchemaType::Enum,
    ];
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringRules {
    /// Minimal length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximal length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp: Option<Pattern>,
    /// Coerce to a canonical ISO-8601 UTC timestamp after matching.
    #[serde(default, skip_serializing_if = "is_false")]
    pub as_date: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub as_integer: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumRules {
    /// Allowed values, in order. Must not be empty.
    #[serde(rename = "enum", default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayRules {
    /// Schema every element must satisfy.
    pub of: Box<SchemaNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Dedup key: a path expression into each element, or `""` to compare
    /// whole elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<String>,
}

impl ArrayRules {
    pub fn of(node: SchemaNode) -> Self {
        Self {
            of: Box::new(node),
            min_length: None,
            max_length: None,
            unique: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRules {
    /// Known keys, validated in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub childs: Option<Childs>,
    /// Schema for every value when `childs` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of: Option<Box<SchemaNode>>,
    /// Pattern every validated key name must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys_regexp: Option<Pattern>,
    #[serde(default, alias = "additinalProperties")]
    pub additional_properties: AdditionalProperties,
}

/// Policy for input keys not declared in `childs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdditionalProperties {
    /// Undeclared keys are errors.
    Reject,
    /// Undeclared keys are dropped from the output.
    #[default]
    Remove,
}

/// A compiled regular expression with the message reported on mismatch.
///
/// Deserializes from either a bare pattern string or a
/// `{pattern, message}` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PatternRepr", into = "PatternRepr")]
pub struct Pattern {
    regex: Regex,
    message: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PatternRepr {
    Bare(String),
    Detailed {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl Pattern {
    /// Compile `pattern` with the default mismatch message.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: None,
        })
    }

    /// Compile `pattern` with a custom mismatch message.
    pub fn with_message(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: Some(message.into()),
        })
    }

    /// Unanchored search, like `Regex::is_match`.
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_PATTERN_MESSAGE)
    }
}

impl TryFrom<PatternRepr> for Pattern {
    type Error = regex::Error;

    fn try_from(repr: PatternRepr) -> Result<Self, Self::Error> {
        match repr {
            PatternRepr::Bare(pattern) => Pattern::new(&pattern),
            PatternRepr::Detailed { pattern, message } => Ok(Self {
                regex: Regex::new(&pattern)?,
                message,
            }),
        }
    }
}

impl From<Pattern> for PatternRepr {
    fn from(pattern: Pattern) -> Self {
        match pattern.message {
            Some(message) => PatternRepr::Detailed {
                pattern: pattern.regex.as_str().to_string(),
                message: Some(message),
            },
            None => PatternRepr::Bare(pattern.regex.as_str().to_string()),
        }
    }
}

impl SchemaKind {
    pub fn schema_type(&self) -> SchemaType {
        match self {
            SchemaKind::Any => SchemaType::Any,
            SchemaKind::Boolean => SchemaType::Boolean,
            SchemaKind::Number(_) => SchemaType::Number,
            SchemaKind::String(_) => SchemaType::String,
            SchemaKind::Enum(_) => SchemaType::Enum,
            SchemaKind::Array(_) => SchemaType::Array,
            SchemaKind::Object(_) => SchemaType::Object,
        }
    }
}

impl SchemaNode {
    /// A node of the given kind with default metadata.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: false,
            nullable: false,
            human_key_name: None,
            description: None,
            parse_transform: None,
            output_transform: None,
        }
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number(NumberRules::default()))
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String(StringRules::default()))
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Enum(EnumRules {
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn array(of: SchemaNode) -> Self {
        Self::new(SchemaKind::Array(ArrayRules::of(of)))
    }

    /// Object with declared keys, dropping undeclared ones.
    pub fn object(childs: Childs) -> Self {
        Self::new(SchemaKind::Object(ObjectRules {
            childs: Some(childs),
            ..ObjectRules::default()
        }))
    }

    /// Object whose every value follows `of` (a map).
    pub fn map_of(of: SchemaNode) -> Self {
        Self::new(SchemaKind::Object(ObjectRules {
            of: Some(Box::new(of)),
            ..ObjectRules::default()
        }))
    }

    pub fn schema_type(&self) -> SchemaType {
        self.kind.schema_type()
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn human_key_name(mut self, name: impl Into<String>) -> Self {
        self.human_key_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parse_transform(mut self, transform: Transform) -> Self {
        self.parse_transform = Some(transform);
        self
    }

    pub fn output_transform(mut self, transform: Transform) -> Self {
        self.output_transform = Some(transform);
        self
    }

    /// Walk the schema and report the first structural problem.
    ///
    /// Validation reports the same problems lazily, only when a malformed
    /// node is reached; this lets callers reject a schema up front.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Schema` for an enum without values or an
    /// object declaring neither `childs` nor `of`.
    pub fn check(&self) -> Result<(), ValidationError> {
        self.check_at("")
    }

    fn check_at(&self, field: &str) -> Result<(), ValidationError> {
        match &self.kind {
            SchemaKind::Enum(rules) if rules.values.is_empty() => Err(ValidationError::Schema {
                field: field.to_string(),
                reason: "missing 'enum' values".to_string(),
            }),
            SchemaKind::Array(rules) => rules.of.check_at(&format!("{field}[]")),
            SchemaKind::Object(rules) => {
                if let Some(childs) = &rules.childs {
                    for (key, child) in childs {
                        child.check_at(&join_field(field, key))?;
                    }
                    Ok(())
                } else if let Some(of) = &rules.of {
                    of.check_at(&join_field(field, "*"))
                } else {
                    Err(ValidationError::Schema {
                        field: field.to_string(),
                        reason: "missing 'childs' or 'of'".to_string(),
                    })
                }
            }
            _ => Ok(()),
        }
    }
}

/// Join an object key onto a field path (`""` + `a` → `a`, `a` + `b` → `a.b`).
pub(crate) fn join_field(field: &str, key: &str) -> String {
    if field.is_empty() {
        key.to_string()
    } else {
        format!("{field}.{key}")
    }
}
