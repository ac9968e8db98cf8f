//! envfile: load KEY=VALUE env files with interpolation
//!
//! Command-line front end for the `envfile` library: check files, print their
//! resolved entries, or run a program with them loaded.

use anyhow::Result;

mod cli;
mod config;

fn main() -> Result<()> {
    cli::run()
}
