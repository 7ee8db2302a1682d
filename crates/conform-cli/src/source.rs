//! Arguments and helpers shared by the subcommands that load configuration.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use conform_config::source::parse_yaml;
use conform_config::{ConfigError, Configuration};
use conform_core::path;
use conform_schema::{Childs, SchemaNode};

/// Schema, configuration files and overrides.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Schema file: a mapping from top-level key to schema node.
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Configuration files, merged in the given order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Override a value after merging. The value is parsed as YAML and is
    /// deep-merged like a file, so arrays are appended to.
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, Value)>,
}

impl SourceArgs {
    /// Load, merge, override and validate.
    pub async fn load(&self) -> anyhow::Result<Configuration> {
        let schema = load_schema(&self.schema)?;
        let config = Configuration::load(schema, self.files.as_slice(), overrides(&self.set)).await?;
        Ok(config)
    }
}

/// Read a schema file and reject malformed schemas up front.
pub fn load_schema(path: &Path) -> anyhow::Result<Childs> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let schema: Childs = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse schema {}", path.display()))?;
    SchemaNode::object(schema.clone())
        .check()
        .with_context(|| format!("malformed schema {}", path.display()))?;
    Ok(schema)
}

/// Parse `path=value`, reading the value as a YAML scalar or document.
pub fn parse_assignment(input: &str) -> Result<(String, Value), String> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got '{input}'"))?;
    if key.is_empty() {
        return Err("override path must not be empty".to_string());
    }
    let value = parse_yaml(raw).map_err(|e| e.to_string())?;
    Ok((key.to_string(), value))
}

/// Build one override document from path assignments, applied in order.
pub fn overrides(assignments: &[(String, Value)]) -> Value {
    if assignments.is_empty() {
        return Value::Null;
    }
    let mut document = Value::Object(serde_json::Map::new());
    for (key, value) in assignments {
        path::set(&mut document, key, value.clone());
    }
    document
}

/// Print the details of a validation failure and map it to an exit code.
/// Any other error is passed through.
pub fn report(err: anyhow::Error) -> anyhow::Result<ExitCode> {
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Validation { details }) => {
            eprintln!("Configuration is not valid by schema:");
            for detail in details {
                eprintln!("  {detail}");
            }
            Ok(ExitCode::FAILURE)
        }
        _ => Err(err),
    }
}
