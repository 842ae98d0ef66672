//! Macro definition loading
//!
//! A macro file describes one named sequence of UI commands:
//!
//! ```yaml
//! id: dev.example.ShowLongSlices
//! name: Show long slices
//! run:
//!   - id: dev.perfetto.RunQuery
//!     args: ["SELECT * FROM slice WHERE dur > 1e6"]
//! ```
//!
//! `commands` is accepted in place of `run`. When `id` is omitted it is
//! derived from the file name: `show_long_slices.yaml` under namespace `ns`
//! becomes `ns.ShowLongSlices`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One macro in the `macros` output document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macro {
    /// Fully-qualified macro id
    pub id: String,

    /// Display name
    pub name: String,

    /// Commands executed in order
    pub run: Vec<MacroCommand>,
}

/// A single command invocation inside a macro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroCommand {
    /// Command id
    pub id: String,

    /// Positional arguments, passed through untouched
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<serde_json::Value>,
}

/// On-disk shape of a macro file
#[derive(Debug, Deserialize)]
struct MacroFile {
    #[serde(default)]
    id: Option<String>,

    name: String,

    #[serde(default, alias = "commands")]
    run: Vec<MacroCommand>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serialization format of a macro file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MacroFormat {
    Yaml,
    Json,
}

impl MacroFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(MacroFormat::Yaml),
            Some("json") => Some(MacroFormat::Json),
            _ => None,
        }
    }
}

impl Macro {
    /// Load a macro definition from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path, namespace: &str) -> CoreResult<Self> {
        let format = MacroFormat::from_path(path).ok_or_else(|| CoreError::MacroInvalid {
            path: path.display().to_string(),
            message: "expected a .yaml, .yml or .json file".to_string(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io_at(path, e))?;
        Self::load_from_str(&content, format, path, namespace)
    }

    fn load_from_str(
        content: &str,
        format: MacroFormat,
        path: &Path,
        namespace: &str,
    ) -> CoreResult<Self> {
        let parse_error = |details: String| CoreError::MacroParseError {
            path: path.display().to_string(),
            details,
        };
        let file: MacroFile = match format {
            MacroFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            MacroFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
        };

        let id = match file.id {
            Some(id) => id,
            None => derived_macro_id(path, namespace)?,
        };
        if id.trim().is_empty() {
            return Err(CoreError::MacroInvalid {
                path: path.display().to_string(),
                message: "macro 'id' cannot be empty".to_string(),
            });
        }
        if let Some(position) = file.run.iter().position(|cmd| cmd.id.trim().is_empty()) {
            return Err(CoreError::MacroInvalid {
                path: path.display().to_string(),
                message: format!("command #{} has an empty 'id'", position + 1),
            });
        }

        Ok(Macro {
            id,
            name: file.name,
            run: file.run,
        })
    }
}

fn derived_macro_id(path: &Path, namespace: &str) -> CoreResult<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CoreError::MacroInvalid {
            path: path.display().to_string(),
            message: "file name is not valid UTF-8".to_string(),
        })?;
    Ok(format!("{}.{}", namespace, to_pascal_case(stem)))
}

/// Convert a snake_case name to PascalCase.
///
/// Each `_`-separated word gets an upper-case first letter and a lower-case
/// remainder, so `show_LONG_slices` becomes `ShowLongSlices`.
pub fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Collect every macro file directly inside `dir`, in file name order.
///
/// A missing `dir` yields an empty list. Sub-directories and files with
/// other extensions are ignored.
pub fn collect_macros(dir: &Path, namespace: &str) -> CoreResult<Vec<Macro>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| CoreError::io_at(dir, e))? {
        let path = entry.map_err(|e| CoreError::io_at(dir, e))?.path();
        if path.is_file() && MacroFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();

    files
        .iter()
        .map(|path| {
            log::debug!("Macro <- {}", path.display());
            Macro::load(path, namespace)
        })
        .collect()
}

#[cfg(test)]
#[path = "macros_test.rs"]
mod tests;
