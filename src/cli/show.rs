//! Show command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use envfile::load::apply;
use envfile::Entry;

use super::utils::{build_loader, escape_value, resolve_files, shell_quote, snapshot_env};
use crate::config::CliConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// KEY=value lines with control characters escaped
    Text,
    /// JSON array of entries
    Json,
    /// `export KEY='value'` lines
    Shell,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Env files, processed in order (default: configured files, then .envfile)
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only show entries marked export or overload
    #[arg(long)]
    pub exported: bool,

    /// Give up resolving after this many substitution passes
    #[arg(long, value_name = "N")]
    pub max_passes: Option<usize>,
}

pub fn run(args: ShowArgs, config: &CliConfig) -> Result<()> {
    let loader = build_loader(args.max_passes, config);
    let mut env = snapshot_env();
    let mut shown: Vec<Entry> = Vec::new();

    for path in resolve_files(&args.files, config) {
        let entries = loader.parse_path(&path, &env)?;
        apply(&path.display().to_string(), &entries, &mut env)?;
        shown.extend(entries.into_iter().filter(|e| !args.exported || e.is_exposed()));
    }

    print!("{}", render(&shown, args.format)?);
    Ok(())
}

fn render(entries: &[Entry], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(entries)?),
        OutputFormat::Text => entries
            .iter()
            .map(|e| format!("{}={}\n", e.key, escape_value(&e.value)))
            .collect(),
        OutputFormat::Shell => entries
            .iter()
            .map(|e| format!("export {}={}\n", e.key, shell_quote(&e.value)))
            .collect(),
    };
    Ok(out)
}
