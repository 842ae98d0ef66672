//! Manifest describing a built extension package

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::feature::FeatureKind;
use crate::module_name::ModuleName;
use crate::output::write_json;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The top-level `manifest` document.
///
/// `features` always lists every [`FeatureKind`], whether or not any module
/// populates it. Features and modules serialize as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Package name
    pub name: String,

    /// Package namespace
    pub namespace: String,

    /// Feature kinds the package may serve
    pub features: Vec<FeatureKind>,

    /// Modules in the package, sorted
    pub modules: Vec<ModuleName>,
}

impl Manifest {
    /// Create a manifest for `modules`.
    pub fn new(config: &Config, modules: &[ModuleName]) -> Self {
        let mut modules = modules.to_vec();
        modules.sort();
        Self {
            name: config.name.clone(),
            namespace: config.namespace.clone(),
            features: FeatureKind::ALL.to_vec(),
            modules,
        }
    }

    /// Number of modules listed
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Write the manifest to `path`.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        write_json(path, self)
    }

    /// Load a previously written manifest.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io_at(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
