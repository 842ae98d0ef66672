//! Build command implementation

use anyhow::{Context, Result};
use xp_core::BuildEvent;

use crate::cli::GlobalArgs;
use crate::commands::common::{load_builder, verbose};

/// Execute the build command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let mut builder = load_builder(global)?;

    verbose(
        global,
        &format!(
            "Building '{}' (namespace {}) from {}",
            builder.config().name,
            builder.config().namespace,
            builder.layout().root.display()
        ),
    );

    let report = builder
        .build_with_progress(|event| match event {
            BuildEvent::Warning(warning) => eprintln!("Warning: {}", warning),
            BuildEvent::ModuleBuilt(module) => verbose(
                global,
                &format!(
                    "{}: {} sql modules, {} macros, {} proto descriptors",
                    module.name, module.sql_modules, module.macros, module.proto_descriptors
                ),
            ),
        })
        .context("Build failed")?;

    println!("{}", report.summary_line());
    Ok(())
}
