//! # Keys Subcommand
//!
//! Lists the leaf key paths of a schema, one per line, with the kind of the
//! node each path ends at. Optional keys carry a `?` marker and every array
//! level a `[]` suffix.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use conform_schema::{leaf_keys_with, SchemaNode, SchemaType};

use crate::source::load_schema;

/// Arguments for the keys subcommand.
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Schema file: a mapping from top-level key to schema node.
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Kinds that end a path (default: Any, Boolean, Number, String, Enum).
    #[arg(long, value_delimiter = ',', value_parser = parse_schema_type)]
    pub stop_at: Vec<SchemaType>,
}

/// Run the keys subcommand.
pub fn run_keys(args: &KeysArgs) -> anyhow::Result<ExitCode> {
    let root = SchemaNode::object(load_schema(&args.schema)?);
    for line in key_lines(&root, &args.stop_at) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// `path<TAB>Kind` for every leaf of `root`.
pub fn key_lines(root: &SchemaNode, stop_at: &[SchemaType]) -> Vec<String> {
    let final_types: &[SchemaType] = if stop_at.is_empty() {
        &SchemaType::SCALARS
    } else {
        stop_at
    };
    leaf_keys_with(root, final_types)
        .into_iter()
        .map(|(path, node)| format!("{path}\t{}", node.schema_type()))
        .collect()
}

/// Parse a kind name as written in schemas (`Number`, `Object`, ...).
pub fn parse_schema_type(input: &str) -> Result<SchemaType, String> {
    serde_json::from_value(serde_json::Value::String(input.to_string()))
        .map_err(|_| format!("unknown schema type '{input}'"))
}
