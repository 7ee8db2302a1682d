//! # conform-core — Foundational Value Helpers
//!
//! Leaf crate of the conform workspace. Everything here operates on
//! `serde_json::Value` trees and has no knowledge of schemas.
//!
//! ## Modules
//!
//! - [`kind`] — total type-check predicates over values.
//! - [`path`] — the path expression mini-language (`a.b[0]["c"]`, `a[].b`)
//!   used to read and write nested fields.
//! - [`array`] — duplicate detection and ordered set difference.
//! - [`merge`] — deep merge of parsed documents.
//! - [`temporal`] — lenient date parsing and canonical ISO-8601 output.
//! - [`text`] — simple casing helpers.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `conform-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod array;
pub mod error;
pub mod kind;
pub mod merge;
pub mod path;
pub mod temporal;
pub mod text;

// Re-export primary types for ergonomic imports.
pub use error::{CoreError, PathError};
pub use kind::Kind;
pub use merge::{merge_all, merge_deep};
pub use temporal::{coerce_date, parse_date};
