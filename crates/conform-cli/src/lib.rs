//! # conform-cli — Command-Line Interface
//!
//! Thin clap front end over `conform-config` and `conform-schema`.
//!
//! ## Subcommands
//!
//! - `validate` — merge files, apply `--set` overrides, validate, print JSON
//! - `get` — same loading, then print the value at one path expression
//! - `keys` — list the leaf key paths of a schema
//!
//! Schema files are YAML or JSON mappings from top-level key to schema node.
//! A configuration that fails validation prints one `field: message` line
//! per violation on stderr and exits with status 1.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers, which delegate to the
//!   library crates.
//! - Handlers return `anyhow::Result`; only `main` decides how errors end
//!   the process.

pub mod get;
pub mod keys;
pub mod source;
pub mod validate;
