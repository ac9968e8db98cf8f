//! Command-line interface for envfile
//!
//! Provides `check`, `show`, `run` and `completions` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, CliConfig};

mod check;
mod completions;
mod exec;
mod show;
mod utils;

/// Load KEY=VALUE env files with interpolation into the environment
#[derive(Parser)]
#[command(name = "envfile")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: envfile.toml, .envfile.toml or envfile.yml in the working directory)
    #[arg(long, global = true, value_name = "PATH", env = "ENVFILE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and resolve env files, reporting the first error
    Check(check::CheckArgs),

    /// Print resolved entries
    Show(show::ShowArgs),

    /// Load env files and run a program with the resulting environment
    Run(exec::RunArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config_path = cli.config;
    let config = || -> Result<CliConfig> {
        let cwd = std::env::current_dir()?;
        load_config(&cwd, config_path.as_deref())
    };

    match cli.command {
        Commands::Check(args) => check::run(args, &config()?),
        Commands::Show(args) => show::run(args, &config()?),
        Commands::Run(args) => exec::run(args, &config()?),
        Commands::Completions(args) => completions::run(args),
    }
}
