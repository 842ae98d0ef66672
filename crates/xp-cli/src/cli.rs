//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// xp - build an extension package from SQL, macro, and proto sources
///
/// Running `xp` without a subcommand performs a full build.
#[derive(Parser, Debug)]
#[command(name = "xp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute (default: build)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Proto compiler to invoke
    #[arg(long, global = true, env = "PROTOC", default_value = "protoc")]
    pub protoc: PathBuf,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every module and write the manifest
    Build,

    /// List modules and what they contain
    Ls(LsArgs),

    /// Remove generated output files
    Clean(CleanArgs),
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Show what would be removed without removing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
