//! Validation of part properties against a plugin schema
//!
//! Properties arrive as untyped JSON values (the parts file format does not
//! matter here). Validation applies defaults, enforces required fields and
//! value kinds, and rejects properties the schema does not declare.

use part_plugin_api::{FieldKind, FieldSpec, FieldValue, PartOptions, PluginSchema};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced when part properties do not satisfy a schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Missing required property '{field}'")]
    MissingRequired { field: String },

    #[error("Property '{field}' must be {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: &'static str,
    },

    #[error("Item {index} of property '{field}' must be a string, found {found}")]
    InvalidItem {
        field: String,
        index: usize,
        found: &'static str,
    },

    #[error("Unknown property '{field}'")]
    UnknownProperty { field: String },
}

impl SchemaError {
    /// Name of the offending property
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field }
            | Self::TypeMismatch { field, .. }
            | Self::InvalidItem { field, .. }
            | Self::UnknownProperty { field } => field,
        }
    }
}

/// Validate raw properties and produce plugin options
pub fn validate_properties(
    schema: &PluginSchema,
    properties: &Map<String, Value>,
) -> Result<PartOptions, SchemaError> {
    let mut options = PartOptions::new();

    for field in &schema.fields {
        match properties.get(&field.name) {
            Some(raw) => options.insert(field.name.clone(), convert(field, raw)?),
            None => match &field.default {
                Some(default) => options.insert(field.name.clone(), default.clone()),
                None if field.required => {
                    return Err(SchemaError::MissingRequired {
                        field: field.name.clone(),
                    })
                }
                None => {}
            },
        }
    }

    let mut unknown: Vec<&String> = properties
        .keys()
        .filter(|key| schema.get(key).is_none())
        .collect();
    unknown.sort();
    if let Some(key) = unknown.first() {
        return Err(SchemaError::UnknownProperty {
            field: key.to_string(),
        });
    }

    Ok(options)
}

fn convert(field: &FieldSpec, raw: &Value) -> Result<FieldValue, SchemaError> {
    match (field.kind, raw) {
        (FieldKind::String, Value::String(s)) => Ok(FieldValue::String(s.clone())),
        (FieldKind::StringArray, Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(SchemaError::InvalidItem {
                    field: field.name.clone(),
                    index,
                    found: json_type(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::StringArray),
        (expected, other) => Err(SchemaError::TypeMismatch {
            field: field.name.clone(),
            expected,
            found: json_type(other),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
