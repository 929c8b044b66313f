//! Parts file loading
//!
//! Reads the `parts:` block of a snapcraft-style YAML project. Each part
//! names its plugin; every other key is kept as a raw property for the
//! plugin's schema to validate.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading a project
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid part '{name}'")]
    InvalidPart {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Part names must be strings, found {0:?}")]
    InvalidPartName(serde_yaml::Value),

    #[error("Unknown part: {0}")]
    UnknownPart(String),
}

/// One part of the project
#[derive(Debug, Clone, PartialEq)]
pub struct PartDefinition {
    pub name: String,
    pub plugin: String,
    pub properties: Map<String, Value>,
}

#[derive(Deserialize)]
struct ProjectFile {
    #[serde(default)]
    parts: serde_yaml::Mapping,
}

#[derive(Deserialize)]
struct PartBody {
    plugin: String,
    #[serde(flatten)]
    properties: Map<String, Value>,
}

/// Parts in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub parts: Vec<PartDefinition>,
}

impl Project {
    /// Load a project from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a project from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, ProjectError> {
        let file: ProjectFile = serde_yaml::from_str(content)?;

        let mut parts = Vec::with_capacity(file.parts.len());
        for (key, body) in file.parts {
            let name = match key {
                serde_yaml::Value::String(name) => name,
                other => return Err(ProjectError::InvalidPartName(other)),
            };
            let body: PartBody = serde_yaml::from_value(body).map_err(|source| {
                ProjectError::InvalidPart {
                    name: name.clone(),
                    source,
                }
            })?;
            parts.push(PartDefinition {
                name,
                plugin: body.plugin,
                properties: body.properties,
            });
        }

        Ok(Self { parts })
    }

    /// Look up a part by name
    pub fn part(&self, name: &str) -> Result<&PartDefinition, ProjectError> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ProjectError::UnknownPart(name.to_string()))
    }

    /// Parts matching `names` in file order, or every part when `names` is empty
    pub fn select(&self, names: &[String]) -> Result<Vec<&PartDefinition>, ProjectError> {
        if let Some(missing) = names.iter().find(|n| self.part(n).is_err()) {
            return Err(ProjectError::UnknownPart(missing.clone()));
        }
        Ok(self
            .parts
            .iter()
            .filter(|p| names.is_empty() || names.contains(&p.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PROJECT: &str = r#"
name: hello
version: "1.0"
parts:
  zeta:
    plugin: shell
    shell-command: echo zeta
  alpha:
    plugin: shell
    shell: /bin/bash
    shell-flags: [-e, -x]
    shell-command: |
      echo alpha
"#;

    #[test]
    fn test_parse_keeps_file_order() {
        let project = Project::from_yaml_str(PROJECT).unwrap();

        let names: Vec<_> = project.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let alpha = project.part("alpha").unwrap();
        assert_eq!(alpha.plugin, "shell");
        assert_eq!(alpha.properties["shell"], json!("/bin/bash"));
        assert_eq!(alpha.properties["shell-flags"], json!(["-e", "-x"]));
        assert_eq!(alpha.properties["shell-command"], json!("echo alpha\n"));
        assert!(!alpha.properties.contains_key("plugin"));
    }

    #[test]
    fn test_select() {
        let project = Project::from_yaml_str(PROJECT).unwrap();

        let all = project.select(&[]).unwrap();
        assert_eq!(all.len(), 2);

        let picked = project
            .select(&["alpha".to_string(), "zeta".to_string()])
            .unwrap();
        assert_eq!(picked[0].name, "zeta");

        let err = project.select(&["omega".to_string()]).unwrap_err();
        assert!(matches!(err, ProjectError::UnknownPart(name) if name == "omega"));
    }

    #[test]
    fn test_part_without_plugin() {
        let err = Project::from_yaml_str("parts:\n  broken:\n    shell-command: ls\n").unwrap_err();
        match err {
            ProjectError::InvalidPart { name, .. } => assert_eq!(name, "broken"),
            other => panic!("Expected InvalidPart, got {:?}", other),
        }
    }

    #[test]
    fn test_no_parts() {
        let project = Project::from_yaml_str("name: empty\n").unwrap();
        assert!(project.parts.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Project::load("/nonexistent/snapcraft.yaml").unwrap_err();
        assert!(matches!(err, ProjectError::Io { .. }));
    }
}
