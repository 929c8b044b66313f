//! Declarative option schema
//!
//! A plugin describes the options it accepts as a table of [`FieldSpec`]s.
//! Hosts validate user configuration against this table before a plugin
//! instance is ever constructed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of value accepted by a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// A single string
    String,

    /// An ordered sequence of strings
    StringArray,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::StringArray => f.write_str("array of strings"),
        }
    }
}

/// A validated option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    StringArray(Vec<String>),
}

impl FieldValue {
    /// Kind of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::StringArray(_) => FieldKind::StringArray,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::StringArray(_) => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(items) => Some(items),
            Self::String(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

/// Specification of a single option accepted by a plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Option name as written in the parts file (e.g., "shell-command")
    pub name: String,

    /// Accepted value type
    pub kind: FieldKind,

    /// Value applied when the option is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,

    /// Whether the option must be present after defaults are applied
    #[serde(default)]
    pub required: bool,

    /// Help text for this option
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
}

impl FieldSpec {
    /// Create a string option
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Create a string array option
    pub fn string_array(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::StringArray)
    }

    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            required: false,
            help: String::new(),
        }
    }

    /// Set as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set default value
    pub fn default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set help text
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }
}

/// Full option table of a plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginSchema {
    /// Accepted options, in declaration order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Options whose change invalidates a previous build
    #[serde(default)]
    pub build_properties: Vec<String>,
}

impl PluginSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Mark an option as a build property
    pub fn build_property(mut self, name: impl Into<String>) -> Self {
        self.build_properties.push(name.into());
        self
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the fields marked as required
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}
