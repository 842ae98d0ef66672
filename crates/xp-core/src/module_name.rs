//! Module directory names

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of a module directory under `src/`.
///
/// Serializes as a bare string, which is how modules appear in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Returns `None` for an empty name.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.is_empty()).then_some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ModuleName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}
