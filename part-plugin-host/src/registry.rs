//! Plugin registry
//!
//! Maps plugin names to their schema and constructor. Instantiation always
//! validates the part's properties first, so a plugin is never built from
//! configuration its schema rejects.

use crate::validate::{validate_properties, SchemaError};
use part_plugin_api::{OptionsError, PartOptions, PartPlugin, Plugin, PluginManifest};
use serde_json::{Map, Value};
use std::collections::HashMap;

type Constructor = fn(&PartOptions) -> Result<Box<dyn PartPlugin>, OptionsError>;

struct PluginEntry {
    manifest: PluginManifest,
    construct: Constructor,
}

/// Registry of the plugins a host can build parts with
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, PluginEntry>,
}

fn construct<P: Plugin + 'static>(
    options: &PartOptions,
) -> Result<Box<dyn PartPlugin>, OptionsError> {
    Ok(Box::new(P::from_options(options)?))
}

impl PluginRegistry {
    /// Create a new empty plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin type, replacing any plugin with the same name
    pub fn register<P: Plugin + 'static>(&mut self) -> &mut Self {
        let manifest = PluginManifest::of::<P>();
        tracing::debug!(
            plugin = %manifest.name,
            fields = manifest.schema.fields.len(),
            "Plugin registered"
        );
        self.plugins.insert(
            manifest.name.clone(),
            PluginEntry {
                manifest,
                construct: construct::<P>,
            },
        );
        self
    }

    /// Builder-style [`PluginRegistry::register`]
    pub fn with<P: Plugin + 'static>(mut self) -> Self {
        self.register::<P>();
        self
    }

    /// Check if a plugin exists
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Sorted list of registered plugin names
    pub fn list_plugins(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get a plugin's manifest
    pub fn manifest(&self, name: &str) -> Option<&PluginManifest> {
        self.plugins.get(name).map(|e| &e.manifest)
    }

    /// Validate properties against a plugin's schema
    pub fn validate(
        &self,
        name: &str,
        properties: &Map<String, Value>,
    ) -> Result<PartOptions, RegistryError> {
        let entry = self.entry(name)?;
        validate_properties(&entry.manifest.schema, properties).map_err(|source| {
            RegistryError::Schema {
                plugin: name.to_string(),
                source,
            }
        })
    }

    /// Validate properties and construct the plugin
    pub fn instantiate(
        &self,
        name: &str,
        properties: &Map<String, Value>,
    ) -> Result<Box<dyn PartPlugin>, RegistryError> {
        let options = self.validate(name, properties)?;
        let entry = self.entry(name)?;
        (entry.construct)(&options).map_err(|source| RegistryError::Options {
            plugin: name.to_string(),
            source,
        })
    }

    /// Get the number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&PluginEntry, RegistryError> {
        self.plugins
            .get(name)
            .ok_or_else(|| RegistryError::PluginNotFound(name.to_string()))
    }
}

/// Errors that can occur during registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("Invalid properties for plugin '{plugin}'")]
    Schema {
        plugin: String,
        #[source]
        source: SchemaError,
    },

    #[error("Plugin '{plugin}' rejected its options")]
    Options {
        plugin: String,
        #[source]
        source: OptionsError,
    },
}
