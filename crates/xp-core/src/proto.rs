//! Protobuf descriptor generation through an external `protoc`
//!
//! Each `.proto` file is compiled on its own with its directory as the only
//! import root. The resulting `FileDescriptorSet` is base64-encoded so it can
//! travel inside a JSON document.

use crate::error::{CoreError, CoreResult};
use base64::{engine::general_purpose, Engine as _};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

const PROTO_EXTENSION: &str = "proto";

/// Program name used when no override is configured.
pub const DEFAULT_PROTOC: &str = "protoc";

/// Result of compiling one `.proto` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Base64-encoded descriptor set, plus whatever protoc printed on stderr
    Compiled {
        descriptor: String,
        diagnostics: Option<String>,
    },

    /// The compiler program could not be found; no descriptor was produced
    Skipped,
}

/// Handle on the external proto compiler.
///
/// Once a spawn attempt reports the program as missing, the handle stays
/// unavailable and every later file is skipped without another attempt.
#[derive(Debug, Clone)]
pub struct ProtoCompiler {
    program: PathBuf,
    available: bool,
}

impl ProtoCompiler {
    /// Create a compiler handle for `program` (a name looked up on `PATH`, or
    /// a path).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            available: true,
        }
    }

    /// Compile `file` with `proto_path` as the only import root.
    ///
    /// A non-zero exit is an error carrying protoc's stderr.
    pub fn compile(&mut self, proto_path: &Path, file: &Path) -> CoreResult<CompileOutcome> {
        if !self.available {
            return Ok(CompileOutcome::Skipped);
        }

        let descriptor_out = tempfile::Builder::new()
            .prefix("xp-")
            .suffix(".desc")
            .tempfile()?
            .into_temp_path();

        let mut proto_path_arg = OsString::from("--proto_path=");
        proto_path_arg.push(proto_path);
        let mut descriptor_arg = OsString::from("--descriptor_set_out=");
        descriptor_arg.push(descriptor_out.as_os_str());

        log::debug!("Running {} on {}", self.program.display(), file.display());
        let output = match Command::new(&self.program)
            .arg(proto_path_arg)
            .arg(descriptor_arg)
            .arg(file)
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found", self.program.display());
                self.available = false;
                return Ok(CompileOutcome::Skipped);
            }
            Err(e) => {
                return Err(CoreError::ProtocSpawn {
                    program: self.program.display().to_string(),
                    source: e,
                })
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(CoreError::ProtocFailed {
                path: file.display().to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let bytes =
            std::fs::read(&descriptor_out).map_err(|e| CoreError::io_at(&descriptor_out, e))?;
        Ok(CompileOutcome::Compiled {
            descriptor: general_purpose::STANDARD.encode(bytes),
            diagnostics: (!stderr.is_empty()).then_some(stderr),
        })
    }
}

/// List the `.proto` files directly inside `dir`, sorted by file name.
pub fn discover_proto_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| CoreError::io_at(dir, e))? {
        let path = entry.map_err(|e| CoreError::io_at(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == PROTO_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "proto_test.rs"]
mod tests;
