//! Project directory layout and module discovery
//!
//! ```text
//! <root>/config.yaml
//! <root>/src/<module>/{sql_modules,macros,proto_descriptors}/   inputs
//! <root>/modules/<module>/{sql_modules,macros,proto_descriptors} outputs
//! <root>/manifest                                               output
//! ```

use crate::error::{CoreError, CoreResult};
use crate::feature::FeatureKind;
use crate::module_name::ModuleName;
use std::path::{Path, PathBuf};

/// Directory under the root holding one sub-directory per module.
pub const SOURCE_DIR: &str = "src";

/// Directory under the root receiving per-module output documents.
pub const OUTPUT_DIR: &str = "modules";

/// File name of the top-level manifest.
pub const MANIFEST_FILE: &str = "manifest";

/// Resolved paths of a project on disk.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Project root directory
    pub root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `path`, resolving relative paths against the
    /// current directory.
    pub fn new(path: &Path) -> CoreResult<Self> {
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(Self { root })
    }

    /// `<root>/src`
    pub fn source_root(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    /// `<root>/modules`
    pub fn output_root(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// `<root>/manifest`
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Input directory for one feature of one module.
    pub fn feature_source_dir(&self, module: &ModuleName, kind: FeatureKind) -> PathBuf {
        self.source_root().join(module).join(kind.as_str())
    }

    /// Output directory for one module.
    pub fn module_output_dir(&self, module: &ModuleName) -> PathBuf {
        self.output_root().join(module)
    }

    /// List the immediate sub-directories of `src/`, sorted by name.
    pub fn discover_modules(&self) -> CoreResult<Vec<ModuleName>> {
        let source_root = self.source_root();
        if !source_root.is_dir() {
            return Err(CoreError::SourceRootNotFound {
                path: source_root.display().to_string(),
            });
        }

        let mut modules = Vec::new();
        for entry in
            std::fs::read_dir(&source_root).map_err(|e| CoreError::io_at(&source_root, e))?
        {
            let entry = entry.map_err(|e| CoreError::io_at(&source_root, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            modules.push(module_name_from_dir(&path)?);
        }

        modules.sort();
        Ok(modules)
    }

    /// Generated files currently present on disk.
    ///
    /// Covers the three feature documents of every directory under
    /// `modules/` plus the manifest. Nothing under `src/` is ever returned.
    pub fn existing_outputs(&self) -> CoreResult<Vec<PathBuf>> {
        let mut outputs = Vec::new();
        let output_root = self.output_root();

        if output_root.is_dir() {
            let mut module_dirs = Vec::new();
            for entry in
                std::fs::read_dir(&output_root).map_err(|e| CoreError::io_at(&output_root, e))?
            {
                let entry = entry.map_err(|e| CoreError::io_at(&output_root, e))?;
                if entry.path().is_dir() {
                    module_dirs.push(entry.path());
                }
            }
            module_dirs.sort();

            for dir in module_dirs {
                for kind in FeatureKind::ALL {
                    let file = dir.join(kind.as_str());
                    if file.is_file() {
                        outputs.push(file);
                    }
                }
            }
        }

        let manifest = self.manifest_path();
        if manifest.is_file() {
            outputs.push(manifest);
        }
        Ok(outputs)
    }
}

fn module_name_from_dir(path: &Path) -> CoreResult<ModuleName> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(ModuleName::try_new)
        .ok_or_else(|| CoreError::InvalidModuleDirectory {
            path: path.display().to_string(),
            reason: "directory name is not valid UTF-8".to_string(),
        })
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
