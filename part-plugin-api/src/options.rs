//! Validated plugin options

use crate::error::OptionsError;
use crate::schema::{FieldKind, FieldValue};
use std::collections::BTreeMap;

/// Option values that passed schema validation, with defaults applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartOptions {
    values: BTreeMap<String, FieldValue>,
}

impl PartOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get a string option
    pub fn string(&self, name: &str) -> Result<&str, OptionsError> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| OptionsError::WrongKind {
            name: name.to_string(),
            expected: FieldKind::String,
            actual: value.kind(),
        })
    }

    /// Get a string array option
    pub fn strings(&self, name: &str) -> Result<&[String], OptionsError> {
        let value = self.require(name)?;
        value.as_strings().ok_or_else(|| OptionsError::WrongKind {
            name: name.to_string(),
            expected: FieldKind::StringArray,
            actual: value.kind(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, name: &str) -> Result<&FieldValue, OptionsError> {
        self.values
            .get(name)
            .ok_or_else(|| OptionsError::Missing(name.to_string()))
    }
}
