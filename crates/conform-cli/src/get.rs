//! # Get Subcommand
//!
//! Loads and validates like `validate`, then prints the value at one path
//! expression. Wildcard paths (`servers[].name`) print an array.

use std::process::ExitCode;

use clap::Args;
use serde_json::Value;

use crate::source::{report, SourceArgs};

/// Arguments for the get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Path expression, e.g. `server.listen[0].port`.
    pub path: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the get subcommand. A path with no value exits with status 1.
pub async fn run_get(args: &GetArgs) -> anyhow::Result<ExitCode> {
    let value = match lookup(args).await {
        Ok(value) => value,
        Err(err) => return report(err),
    };
    match value {
        Some(value) => {
            println!("{}", render(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no value at '{}'", args.path);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Load the configuration and resolve the requested path.
pub async fn lookup(args: &GetArgs) -> anyhow::Result<Option<Value>> {
    let config = args.source.load().await?;
    Ok(config.get(&args.path))
}

/// Strings print raw so the output can be used in shell scripts.
fn render(value: &Value) -> serde_json::Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string_pretty(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_strings_raw() {
        assert_eq!(render(&json!("db.local")).unwrap(), "db.local");
        assert_eq!(render(&json!(5432)).unwrap(), "5432");
        assert_eq!(render(&json!([1])).unwrap(), "[\n  1\n]");
    }
}
