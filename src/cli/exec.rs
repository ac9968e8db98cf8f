//! Run command implementation

use anyhow::{Context, Result};
use clap::Args;
use envfile::ProcessEnv;
use std::process::Command;

use super::utils::{build_loader, resolve_files};
use crate::config::CliConfig;

#[derive(Args)]
pub struct RunArgs {
    /// Env file to load; repeat for several (default: configured files, then .envfile)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<String>,

    /// Give up resolving after this many substitution passes
    #[arg(long, value_name = "N")]
    pub max_passes: Option<usize>,

    /// Program to run, followed by its arguments
    #[arg(
        value_name = "PROGRAM",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

pub fn run(args: RunArgs, config: &CliConfig) -> Result<()> {
    let loader = build_loader(args.max_passes, config);
    let report = loader.load(resolve_files(&args.files, config), &mut ProcessEnv)?;
    tracing::debug!(
        "Loaded {} files: {} set, {} kept, {} unchanged",
        report.files_read,
        report.loaded,
        report.skipped_existing,
        report.unchanged
    );

    let (program, rest) = args.command.split_first().context("No program given")?;
    let status = Command::new(program)
        .args(rest)
        .status()
        .with_context(|| format!("Failed to run {}", program))?;

    std::process::exit(status.code().unwrap_or(1));
}
