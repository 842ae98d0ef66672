//! SQL module collection
//!
//! Every `.sql` file below a module's `sql_modules/` directory becomes one
//! entry named after its relative path: `foo/bar.sql` under prefix `ns`
//! becomes `ns.foo.bar`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use walkdir::WalkDir;

const SQL_EXTENSION: &str = "sql";

/// One SQL module in the `sql_modules` output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlModule {
    /// Dotted module name, prefix first
    pub name: String,

    /// File content with line breaks normalized to `\n` and trailing newlines
    /// removed
    pub sql: String,
}

/// Collect every `.sql` file below `dir`, sorted by module name.
///
/// A missing `dir` yields an empty list.
pub fn collect_sql_modules(dir: &Path, prefix: &str) -> CoreResult<Vec<SqlModule>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut modules = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            CoreError::io_at(&path, e.into())
        })?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == SQL_EXTENSION) {
            continue;
        }

        let relative = path.strip_prefix(dir).map_err(|_| CoreError::InvalidSqlModulePath {
            path: path.display().to_string(),
            reason: format!("not below {}", dir.display()),
        })?;
        let name = format!("{}.{}", prefix, dotted_name(relative)?);
        log::debug!("SQL module {} <- {}", name, path.display());

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io_at(path, e))?;
        modules.push(SqlModule {
            name,
            sql: normalize_sql(&content),
        });
    }

    modules.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(modules)
}

/// Convert `\r\n` and lone `\r` line breaks to `\n`, then drop trailing
/// newlines.
fn normalize_sql(content: &str) -> String {
    let unix = content.replace("\r\n", "\n").replace('\r', "\n");
    unix.trim_end_matches('\n').to_string()
}

/// Turn `foo/bar.sql` into `foo.bar`.
pub fn dotted_name(relative: &Path) -> CoreResult<String> {
    let invalid = |reason: &str| CoreError::InvalidSqlModulePath {
        path: relative.display().to_string(),
        reason: reason.to_string(),
    };

    let stem = relative.with_extension("");
    let mut parts = Vec::new();
    for component in stem.components() {
        match component {
            Component::Normal(part) => {
                parts.push(part.to_str().ok_or_else(|| invalid("path is not valid UTF-8"))?)
            }
            _ => return Err(invalid("path must be relative and normalized")),
        }
    }

    if parts.is_empty() {
        return Err(invalid("empty path"));
    }
    Ok(parts.join("."))
}

#[cfg(test)]
#[path = "sql_module_test.rs"]
mod tests;
