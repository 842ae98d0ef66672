//! xp CLI - builds extension packages from SQL, macro, and proto sources

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{build, clean, ls};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None | Some(cli::Commands::Build) => build::execute(&cli.global),
        Some(cli::Commands::Ls(args)) => ls::execute(args, &cli.global),
        Some(cli::Commands::Clean(args)) => clean::execute(args, &cli.global),
    }
}
