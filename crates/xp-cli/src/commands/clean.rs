//! Clean command implementation

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use xp_core::ProjectLayout;

use crate::cli::{CleanArgs, GlobalArgs};

/// Execute the clean command
///
/// Generated files are located by layout alone; no config is loaded.
pub fn execute(args: &CleanArgs, global: &GlobalArgs) -> Result<()> {
    let layout = ProjectLayout::new(&global.project_dir).context("Failed to resolve project")?;
    let outputs = layout
        .existing_outputs()
        .context("Failed to scan generated files")?;

    if args.dry_run {
        println!("Dry run - would remove the following files:");
    } else {
        println!("Cleaning {}", layout.root.display());
    }

    let mut removed = 0;
    for path in &outputs {
        if args.dry_run {
            println!("  Would remove: {}", path.display());
            removed += 1;
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => {
                if global.verbose {
                    println!("  Removed: {}", path.display());
                }
                removed += 1;
            }
            Err(e) => eprintln!("  Failed to remove {}: {}", path.display(), e),
        }
    }

    if !args.dry_run {
        prune_empty_dirs(&layout.output_root())?;
    }

    println!();
    println!(
        "{} {} file{}",
        if args.dry_run { "Would remove" } else { "Removed" },
        removed,
        if removed == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Remove empty module directories under `output_root`, then `output_root`
/// itself if nothing is left.
fn prune_empty_dirs(output_root: &Path) -> Result<()> {
    if !output_root.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(output_root)
        .with_context(|| format!("Failed to read {}", output_root.display()))?
    {
        let path = entry?.path();
        if path.is_dir() && is_empty_dir(&path)? {
            fs::remove_dir(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    if is_empty_dir(output_root)? {
        fs::remove_dir(output_root)
            .with_context(|| format!("Failed to remove {}", output_root.display()))?;
    }
    Ok(())
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    Ok(fs::read_dir(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .next()
        .is_none())
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
