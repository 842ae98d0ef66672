//! The build pipeline
//!
//! load config → discover modules → collect each module → write per-module
//! documents → write the manifest. Modules are processed one at a time and
//! independently of each other.

use crate::config::Config;
use crate::error::CoreResult;
use crate::feature::FeatureKind;
use crate::layout::ProjectLayout;
use crate::macros::{collect_macros, Macro};
use crate::manifest::Manifest;
use crate::module_name::ModuleName;
use crate::output::write_feature;
use crate::proto::{discover_proto_files, CompileOutcome, ProtoCompiler, DEFAULT_PROTOC};
use crate::sql_module::{collect_sql_modules, SqlModule};
use std::fmt;
use std::path::{Path, PathBuf};

/// Options controlling a build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Config file to use instead of `<root>/config.yaml`
    pub config_path: Option<PathBuf>,

    /// Proto compiler program
    pub protoc: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            protoc: PathBuf::from(DEFAULT_PROTOC),
        }
    }
}

/// Everything collected for one module, before it is written
#[derive(Debug, Clone)]
pub struct ModuleContent {
    /// Module name
    pub name: ModuleName,

    /// SQL modules, sorted by name
    pub sql_modules: Vec<SqlModule>,

    /// Macros, in file name order
    pub macros: Vec<Macro>,

    /// Base64-encoded descriptor sets, in file name order
    pub proto_descriptors: Vec<String>,
}

impl ModuleContent {
    /// Summarize entry counts
    pub fn summary(&self) -> ModuleSummary {
        ModuleSummary {
            name: self.name.clone(),
            sql_modules: self.sql_modules.len(),
            macros: self.macros.len(),
            proto_descriptors: self.proto_descriptors.len(),
        }
    }
}

/// Entry counts for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    /// Module name
    pub name: ModuleName,

    /// Number of SQL modules
    pub sql_modules: usize,

    /// Number of macros
    pub macros: usize,

    /// Number of proto descriptors (after a build) or `.proto` files (in an
    /// inventory)
    pub proto_descriptors: usize,
}

impl ModuleSummary {
    /// Count for one feature kind
    pub fn count(&self, kind: FeatureKind) -> usize {
        match kind {
            FeatureKind::Macros => self.macros,
            FeatureKind::SqlModules => self.sql_modules,
            FeatureKind::ProtoDescriptors => self.proto_descriptors,
        }
    }

    /// Feature kinds with at least one entry, in manifest order
    pub fn populated_features(&self) -> Vec<FeatureKind> {
        FeatureKind::ALL
            .into_iter()
            .filter(|kind| self.count(*kind) > 0)
            .collect()
    }
}

/// A non-fatal condition raised during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// protoc could not be found; the file produced no descriptor
    ProtocMissing { module: ModuleName, file: PathBuf },

    /// protoc succeeded but printed diagnostics on stderr
    ProtocDiagnostics {
        module: ModuleName,
        file: PathBuf,
        message: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::ProtocMissing { file, .. } => {
                write!(f, "protoc not found, skipping {}", file_name(file).display())
            }
            BuildWarning::ProtocDiagnostics { file, message, .. } => {
                write!(f, "protoc reported on {}: {}", file_name(file).display(), message)
            }
        }
    }
}

fn file_name(path: &Path) -> &Path {
    Path::new(path.file_name().unwrap_or(path.as_os_str()))
}

/// Progress reported while a build runs
#[derive(Debug, Clone, Copy)]
pub enum BuildEvent<'a> {
    /// A non-fatal condition, reported as soon as it occurs
    Warning(&'a BuildWarning),

    /// A module's documents have been written
    ModuleBuilt(&'a ModuleSummary),
}

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// The manifest that was written
    pub manifest: Manifest,

    /// Per-module entry counts, in module order
    pub modules: Vec<ModuleSummary>,

    /// Non-fatal conditions, in the order they occurred
    pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
    /// `Built <n> modules: <a>, <b>`
    pub fn summary_line(&self) -> String {
        let names: Vec<&str> = self.manifest.modules.iter().map(|m| m.as_str()).collect();
        format!(
            "Built {} modules: {}",
            self.manifest.module_count(),
            names.join(", ")
        )
    }
}

/// Builds an extension package rooted at one directory
#[derive(Debug)]
pub struct Builder {
    layout: ProjectLayout,
    config: Config,
    protoc: ProtoCompiler,
}

impl Builder {
    /// Load config for the project at `root`.
    pub fn load(root: &Path, options: BuildOptions) -> CoreResult<Self> {
        let layout = ProjectLayout::new(root)?;
        let config = match &options.config_path {
            Some(path) => Config::load(path)?,
            None => Config::load_from_dir(&layout.root)?,
        };
        Ok(Self::new(layout, config, ProtoCompiler::new(options.protoc)))
    }

    /// Assemble a builder from already-loaded parts.
    pub fn new(layout: ProjectLayout, config: Config, protoc: ProtoCompiler) -> Self {
        Self {
            layout,
            config,
            protoc,
        }
    }

    /// Loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Project layout
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Run the three collectors for one module without writing anything.
    ///
    /// Warnings are passed to `on_warning` as they occur.
    pub fn collect_module<F>(
        &mut self,
        module: &ModuleName,
        mut on_warning: F,
    ) -> CoreResult<ModuleContent>
    where
        F: FnMut(BuildWarning),
    {
        let namespace = &self.config.namespace;
        let sql_prefix = format!("{}.{}", namespace, module);

        let sql_modules = collect_sql_modules(
            &self.layout.feature_source_dir(module, FeatureKind::SqlModules),
            &sql_prefix,
        )?;
        let macros = collect_macros(
            &self.layout.feature_source_dir(module, FeatureKind::Macros),
            namespace,
        )?;

        let proto_dir = self
            .layout
            .feature_source_dir(module, FeatureKind::ProtoDescriptors);
        let mut proto_descriptors = Vec::new();
        for file in discover_proto_files(&proto_dir)? {
            match self.protoc.compile(&proto_dir, &file)? {
                CompileOutcome::Compiled {
                    descriptor,
                    diagnostics,
                } => {
                    if let Some(message) = diagnostics {
                        on_warning(BuildWarning::ProtocDiagnostics {
                            module: module.clone(),
                            file: file.clone(),
                            message,
                        });
                    }
                    proto_descriptors.push(descriptor);
                }
                CompileOutcome::Skipped => on_warning(BuildWarning::ProtocMissing {
                    module: module.clone(),
                    file,
                }),
            }
        }

        Ok(ModuleContent {
            name: module.clone(),
            sql_modules,
            macros,
            proto_descriptors,
        })
    }

    /// Write the three feature documents of one module.
    pub fn write_module(&self, content: &ModuleContent) -> CoreResult<()> {
        let dir = self.layout.module_output_dir(&content.name);
        write_feature(&dir, FeatureKind::SqlModules, &content.sql_modules)?;
        write_feature(&dir, FeatureKind::Macros, &content.macros)?;
        write_feature(&dir, FeatureKind::ProtoDescriptors, &content.proto_descriptors)?;
        Ok(())
    }

    /// Build every module and write the manifest.
    pub fn build(&mut self) -> CoreResult<BuildReport> {
        self.build_with_progress(|_| {})
    }

    /// Like [`build`](Self::build), reporting each warning as it occurs and
    /// each module once it has been written.
    pub fn build_with_progress<F>(&mut self, mut on_event: F) -> CoreResult<BuildReport>
    where
        F: FnMut(BuildEvent<'_>),
    {
        let module_names = self.layout.discover_modules()?;
        let mut modules = Vec::with_capacity(module_names.len());
        let mut warnings = Vec::new();

        for name in &module_names {
            let content = self.collect_module(name, |warning| {
                on_event(BuildEvent::Warning(&warning));
                warnings.push(warning);
            })?;
            self.write_module(&content)?;

            let summary = content.summary();
            on_event(BuildEvent::ModuleBuilt(&summary));
            modules.push(summary);
        }

        let manifest = Manifest::new(&self.config, &module_names);
        manifest.save(&self.layout.manifest_path())?;
        log::debug!(
            "Wrote manifest with {} modules to {}",
            manifest.module_count(),
            self.layout.manifest_path().display()
        );

        Ok(BuildReport {
            manifest,
            modules,
            warnings,
        })
    }

    /// Count what each module holds without writing output or running
    /// protoc; proto files are counted rather than compiled.
    pub fn inventory(&self) -> CoreResult<Vec<ModuleSummary>> {
        let namespace = &self.config.namespace;
        self.layout
            .discover_modules()?
            .into_iter()
            .map(|name| {
                let sql_prefix = format!("{}.{}", namespace, name);
                let sql_modules = collect_sql_modules(
                    &self.layout.feature_source_dir(&name, FeatureKind::SqlModules),
                    &sql_prefix,
                )?;
                let macros = collect_macros(
                    &self.layout.feature_source_dir(&name, FeatureKind::Macros),
                    namespace,
                )?;
                let protos = discover_proto_files(
                    &self
                        .layout
                        .feature_source_dir(&name, FeatureKind::ProtoDescriptors),
                )?;
                Ok(ModuleSummary {
                    name,
                    sql_modules: sql_modules.len(),
                    macros: macros.len(),
                    proto_descriptors: protos.len(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
