//! Configuration types and parsing for config.yaml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File names checked by [`Config::load_from_dir`], in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Extension package configuration from config.yaml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Namespace prefixed to every SQL module and derived macro id
    pub namespace: String,

    /// Human-readable package name written to the manifest
    pub name: String,
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io_at(path, e))?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for config.yaml or config.yml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map(|path| Self::load(&path))
            .unwrap_or_else(|| {
                Err(CoreError::ConfigNotFound {
                    path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                })
            })
    }

    fn validate(&self) -> CoreResult<()> {
        if self.namespace.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "'namespace' cannot be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "'name' cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
