//! JSON output documents

use crate::error::{CoreError, CoreResult};
use crate::feature::FeatureKind;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Render `value` as 2-space indented JSON followed by a single newline.
///
/// Non-ASCII characters are written as-is.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> CoreResult<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Write `value` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CoreError::io_at(parent, e))?;
    }
    let json = to_json_string(value)?;
    std::fs::write(path, json).map_err(|e| CoreError::io_at(path, e))
}

/// Write `{"<kind>": items}` to `dir/<kind>` and return the file path.
pub fn write_feature<T: Serialize>(
    dir: &Path,
    kind: FeatureKind,
    items: &[T],
) -> CoreResult<PathBuf> {
    let mut document = serde_json::Map::new();
    document.insert(kind.as_str().to_string(), serde_json::to_value(items)?);

    let path = dir.join(kind.as_str());
    write_json(&path, &document)?;
    Ok(path)
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
