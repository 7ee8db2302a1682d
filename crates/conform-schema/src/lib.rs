//! # conform-schema — Schema Validation & Transformation
//!
//! Validates arbitrary `serde_json::Value` trees against declarative
//! [`SchemaNode`]s and produces a validated, coerced copy of the data or a
//! batch of structured field errors.
//!
//! ## Schema Model (`node`)
//!
//! A schema node is a closed sum type ([`SchemaKind`]) with one variant per
//! value kind, plus common metadata (`required`, `nullable`, human-readable
//! names, parse/output transforms). Schemas are plain data: they
//! deserialize from YAML or JSON documents such as
//!
//! ```yaml
//! type: Object
//! childs:
//!   port: { type: Number, required: true, min: 1, max: 65535, asInteger: true }
//!   mode: { type: Enum, enum: [dev, prod] }
//! ```
//!
//! ## Validation (`validate`)
//!
//! - [`validate()`] — recursive type dispatch; every violation found in one
//!   call tree is reported together in a [`FieldErrors`] batch.
//! - [`object_validator()`] — entry point for top-level object documents.
//!
//! ## Leaf Keys (`keys`)
//!
//! [`leaf_keys()`] lists the key paths of a schema (`server.?port`,
//! `hosts[]`) for tooling that documents or enumerates settings.
//!
//! ## Crate Policy
//!
//! - Depends only on `conform-core` internally.
//! - Schemas are never mutated by validation; output is always a new value.
//! - Malformed schemas are usage errors and are never mixed into field errors.

pub mod error;
pub mod keys;
pub mod node;
pub mod transform;
pub mod validate;

pub use error::{FieldError, FieldErrors, TransformError, ValidationError};
pub use keys::{leaf_keys, leaf_keys_with};
pub use node::{
    AdditionalProperties, ArrayRules, Childs, EnumRules, NumberRules, ObjectRules, Pattern,
    SchemaKind, SchemaNode, SchemaType, StringRules,
};
pub use transform::Transform;
pub use validate::{object_validator, validate, validate_at};
