//! Handover CLI - Command-line interface for Handover
//!
//! Provides commands for:
//! - Sharing files and folder trees with another account
//! - Transferring ownership of files and folder trees
//! - Listing owned items and previewing folder expansion
//! - Managing the stored access token and configuration

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod output;

use commands::{
    auth::AuthCommand, completions::CompletionsCommand, config::ConfigCommand, list::ListCommand,
    transfer::TransferCommand, tree::TreeCommand,
};
use context::{CliContext, LoadedConfig};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "handover",
    version,
    about = "Bulk share or transfer ownership of Google Drive files and folders"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Access token (overrides HANDOVER_ACCESS_TOKEN and the keyring)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Share items with, or transfer their ownership to, another account
    Transfer(TransferCommand),
    /// List files and folders owned by the account
    List(ListCommand),
    /// Preview everything a folder expands to
    Tree(TreeCommand),
    /// Manage the stored access token
    #[command(subcommand)]
    Auth(AuthCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Builds the log filter: `-v` flags win, then `RUST_LOG`, then the config level
fn env_filter(verbose: u8, config_level: &str) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Commands::Completions(cmd) = &cli.command {
        cmd.execute()?;
        return Ok(ExitCode::SUCCESS);
    }

    // The default log level lives in the config file; reading it must not log
    let loaded = LoadedConfig::read(cli.config.as_deref())?;

    // Setup tracing; logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose, &loaded.config.logging.level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from_json_flag(cli.json);
    let ctx = CliContext::new(format, cli.quiet, loaded, cli.token.clone());

    match &cli.command {
        Commands::Transfer(cmd) => {
            if !cmd.execute(&ctx).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::List(cmd) => cmd.execute(&ctx).await?,
        Commands::Tree(cmd) => cmd.execute(&ctx).await?,
        Commands::Auth(cmd) => cmd.execute(&ctx).await?,
        Commands::Config(cmd) => cmd.execute(&ctx).await?,
        Commands::Completions(_) => {}
    }
    Ok(ExitCode::SUCCESS)
}
