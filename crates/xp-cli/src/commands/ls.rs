//! List command implementation

use anyhow::{Context, Result};
use xp_core::{FeatureKind, ModuleSummary};

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::load_builder;

/// Execute the ls command
pub fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let builder = load_builder(global)?;
    let modules = builder.inventory().context("Failed to inspect modules")?;

    let info: Vec<ModuleInfo> = modules.iter().map(ModuleInfo::from).collect();
    match args.output {
        LsOutput::Table => print_table(&info),
        LsOutput::Json => print_json(&info)?,
    }
    Ok(())
}

/// Module information for display
#[derive(Debug, serde::Serialize)]
struct ModuleInfo {
    name: String,
    sql_modules: usize,
    macros: usize,
    proto_files: usize,
    features: Vec<FeatureKind>,
}

impl From<&ModuleSummary> for ModuleInfo {
    fn from(summary: &ModuleSummary) -> Self {
        Self {
            name: summary.name.to_string(),
            sql_modules: summary.sql_modules,
            macros: summary.macros,
            proto_files: summary.proto_descriptors,
            features: summary.populated_features(),
        }
    }
}

/// Print modules in table format
fn print_table(modules: &[ModuleInfo]) {
    let name_width = modules
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!(
        "{:<name_width$}  {:>11}  {:>6}  {:>6}  FEATURES",
        "MODULE", "SQL_MODULES", "MACROS", "PROTOS",
    );
    println!(
        "{:-<name_width$}  {:-<11}  {:-<6}  {:-<6}  {}",
        "",
        "",
        "",
        "",
        "-".repeat(30),
    );

    for module in modules {
        let features = if module.features.is_empty() {
            "-".to_string()
        } else {
            module
                .features
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:<name_width$}  {:>11}  {:>6}  {:>6}  {}",
            module.name, module.sql_modules, module.macros, module.proto_files, features,
        );
    }

    println!();
    println!(
        "{} module{}",
        modules.len(),
        if modules.len() == 1 { "" } else { "s" }
    );
}

/// Print modules as JSON
fn print_json(modules: &[ModuleInfo]) -> Result<()> {
    let json = serde_json::to_string_pretty(modules).context("Failed to serialize module list")?;
    println!("{}", json);
    Ok(())
}
