//! part-plugin-api: Shared types for the part plugin system
//!
//! This crate defines the contract between a build host and the plugins it
//! drives: the declarative option schema, validated options, the build
//! environment, and the outcome of the processes a build runs.

pub mod env;
pub mod error;
pub mod options;
pub mod outcome;
pub mod plugin;
pub mod schema;

pub use env::Environment;
pub use error::{BuildError, OptionsError};
pub use options::PartOptions;
pub use outcome::ProcessOutcome;
pub use plugin::{BuildHost, PartPlugin, Plugin};
pub use schema::{FieldKind, FieldSpec, FieldValue, PluginSchema};

use serde::{Deserialize, Serialize};

/// API version for compatibility checking
pub const API_VERSION: u32 = 1;

/// Plugin manifest with API version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// API version for compatibility
    pub api_version: u32,

    /// Plugin name
    pub name: String,

    /// Accepted options
    pub schema: PluginSchema,
}

impl PluginManifest {
    /// Manifest of a plugin type
    pub fn of<P: Plugin>() -> Self {
        Self {
            api_version: API_VERSION,
            name: P::NAME.to_string(),
            schema: P::describe_schema(),
        }
    }
}
