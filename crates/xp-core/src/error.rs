//! Error types for xp-core

use thiserror::Error;

/// Core error type for xp
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Source root (`src/`) not found
    #[error("[E004] Source directory not found: {path}")]
    SourceRootNotFound { path: String },

    /// E005: Module directory cannot be used as a module name
    #[error("[E005] Invalid module directory at '{path}': {reason}")]
    InvalidModuleDirectory { path: String, reason: String },

    /// E006: SQL file path cannot be turned into a dotted module name
    #[error("[E006] Invalid SQL module path '{path}': {reason}")]
    InvalidSqlModulePath { path: String, reason: String },

    /// E007: Macro definition could not be parsed
    #[error("[E007] Failed to parse macro file {path}: {details}")]
    MacroParseError { path: String, details: String },

    /// E008: Macro definition parsed but holds an unusable value
    #[error("[E008] Invalid macro in {path}: {message}")]
    MacroInvalid { path: String, message: String },

    /// E009: protoc ran and reported failure
    #[error("[E009] protoc failed on {path} ({status}): {stderr}")]
    ProtocFailed {
        path: String,
        status: String,
        stderr: String,
    },

    /// E010: protoc exists but could not be started
    #[error("[E010] Failed to run '{program}': {source}")]
    ProtocSpawn {
        program: String,
        source: std::io::Error,
    },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Wrap an IO error with the path it occurred on.
    pub(crate) fn io_at(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
