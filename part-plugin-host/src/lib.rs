//! part-plugin-host: Reference build host for part plugins
//!
//! This crate validates part configuration against plugin schemas, keeps a
//! registry of available plugins, and runs their build steps as child
//! processes.

pub mod lifecycle;
pub mod project;
pub mod registry;
pub mod runner;
pub mod validate;

pub use lifecycle::{LifecycleError, PartBuilder};
pub use project::{PartDefinition, Project, ProjectError};
pub use registry::{PluginRegistry, RegistryError};
pub use runner::{OutputMode, PartDirs, ProcessRunner};
pub use validate::{validate_properties, SchemaError};
pub use part_plugin_api::{
    BuildError, BuildHost, Environment, PartPlugin, Plugin, PluginManifest, ProcessOutcome,
};
