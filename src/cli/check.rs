//! Check command implementation

use anyhow::Result;
use clap::Args;
use envfile::load::apply;

use super::utils::{build_loader, resolve_files, snapshot_env};
use crate::config::CliConfig;

#[derive(Args)]
pub struct CheckArgs {
    /// Env files, checked in order (default: configured files, then .envfile)
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Give up resolving after this many substitution passes
    #[arg(long, value_name = "N")]
    pub max_passes: Option<usize>,
}

pub fn run(args: CheckArgs, config: &CliConfig) -> Result<()> {
    let loader = build_loader(args.max_passes, config);
    let mut env = snapshot_env();

    for path in resolve_files(&args.files, config) {
        let entries = loader.parse_path(&path, &env)?;
        // Later files may reference what earlier files export.
        apply(&path.display().to_string(), &entries, &mut env)?;
        println!("{}: ok ({} entries)", path.display(), entries.len());
    }

    Ok(())
}
