//! Helpers shared by several commands

use anyhow::{Context, Result};
use xp_core::{BuildOptions, Builder};

use crate::cli::GlobalArgs;

/// Build options derived from the global flags
pub(crate) fn build_options(global: &GlobalArgs) -> BuildOptions {
    BuildOptions {
        config_path: global.config.clone(),
        protoc: global.protoc.clone(),
    }
}

/// Load the project config and return a ready builder
pub(crate) fn load_builder(global: &GlobalArgs) -> Result<Builder> {
    Builder::load(&global.project_dir, build_options(global))
        .context("Failed to load project configuration")
}

/// Print verbose output if enabled
pub(crate) fn verbose(global: &GlobalArgs, msg: &str) {
    if global.verbose {
        eprintln!("[verbose] {}", msg);
    }
}
