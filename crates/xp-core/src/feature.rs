//! The three kinds of content an extension module can carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A feature kind.
///
/// The snake_case name doubles as the source sub-directory under
/// `src/<module>/`, the output file under `modules/<module>/`, and the single
/// top-level key of that output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// UI macros: named sequences of commands
    Macros,
    /// SQL text modules
    SqlModules,
    /// Base64-encoded protobuf descriptor sets
    ProtoDescriptors,
}

impl FeatureKind {
    /// Every feature kind, in manifest order.
    pub const ALL: [FeatureKind; 3] = [
        FeatureKind::Macros,
        FeatureKind::SqlModules,
        FeatureKind::ProtoDescriptors,
    ];

    /// The snake_case name of this feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Macros => "macros",
            FeatureKind::SqlModules => "sql_modules",
            FeatureKind::ProtoDescriptors => "proto_descriptors",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
