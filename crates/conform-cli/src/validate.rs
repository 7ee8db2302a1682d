//! # Validate Subcommand
//!
//! Merges the configuration files, applies overrides, validates against the
//! schema and prints the validated document as pretty JSON on stdout.

use std::process::ExitCode;

use clap::Args;
use serde_json::Value;

use crate::source::{report, SourceArgs};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print nothing on success.
    #[arg(long, short)]
    pub quiet: bool,
}

/// Run the validate subcommand.
pub async fn run_validate(args: &ValidateArgs) -> anyhow::Result<ExitCode> {
    let document = match validated_document(args).await {
        Ok(document) => document,
        Err(err) => return report(err),
    };
    if !args.quiet {
        println!("{}", serde_json::to_string_pretty(&document)?);
    }
    tracing::info!(files = args.source.files.len(), "configuration is valid");
    Ok(ExitCode::SUCCESS)
}

/// Load and validate, returning the validated document.
pub async fn validated_document(args: &ValidateArgs) -> anyhow::Result<Value> {
    let config = args.source.load().await?;
    Ok(config
        .data()
        .map(|view| view.to_value())
        .unwrap_or(Value::Null))
}
