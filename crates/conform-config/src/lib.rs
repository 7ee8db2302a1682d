//! # conform-config — Schema-Validated Configuration
//!
//! Loads configuration documents, merges them and validates the result
//! against a `conform-schema` schema.
//!
//! ## Modules
//!
//! - [`source`] — concurrent file reads and YAML parsing.
//! - [`config`] — the [`Configuration`] instance: merge, validate, get, set.
//! - [`guard`] — the write-guarded [`View`] handed to readers.
//!
//! ## Crate Policy
//!
//! - The only async code is file loading; everything else is synchronous.
//! - The snapshot is mutated only through [`Configuration`] methods, each of
//!   which re-validates.
//! - A failed validation discards the snapshot rather than keeping stale data.

pub mod config;
pub mod error;
pub mod guard;
pub mod source;

pub use config::Configuration;
pub use error::{ConfigError, GuardError};
pub use guard::{Accessors, Entry, Guard, View};
pub use source::{parse_source, read_sources};
