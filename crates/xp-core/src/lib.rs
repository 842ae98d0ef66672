//! xp-core - Core library for xp
//!
//! This crate provides config loading, module discovery, the SQL, macro, and
//! proto descriptor collectors, and the manifest writer used to build an
//! extension package.

pub mod builder;
pub mod config;
pub mod error;
pub mod feature;
pub mod layout;
pub mod macros;
pub mod manifest;
pub mod module_name;
pub mod output;
pub mod proto;
pub mod sql_module;

pub use builder::{
    BuildEvent, BuildOptions, BuildReport, BuildWarning, Builder, ModuleContent, ModuleSummary,
};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use feature::FeatureKind;
pub use layout::ProjectLayout;
pub use macros::{Macro, MacroCommand};
pub use manifest::Manifest;
pub use module_name::ModuleName;
pub use proto::{CompileOutcome, ProtoCompiler};
pub use sql_module::SqlModule;
