//! # conform CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// conform: validate configuration files against declarative schemas.
#[derive(Parser, Debug)]
#[command(name = "conform", version, about)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate and print the merged configuration.
    Validate(conform_cli::validate::ValidateArgs),
    /// Print the value at a path expression.
    Get(conform_cli::get::GetArgs),
    /// List the leaf key paths of a schema.
    Keys(conform_cli::keys::KeysArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate(args) => conform_cli::validate::run_validate(&args).await,
        Commands::Get(args) => conform_cli::get::run_get(&args).await,
        Commands::Keys(args) => conform_cli::keys::run_keys(&args),
    }
}
