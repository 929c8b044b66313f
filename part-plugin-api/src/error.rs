//! Errors shared between hosts and plugins

use crate::outcome::ProcessOutcome;
use crate::schema::FieldKind;
use thiserror::Error;

/// Errors raised while constructing a plugin from validated options
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Missing option: {0}")]
    Missing(String),

    #[error("Option '{name}' must be a {expected}, got {actual}")]
    WrongKind {
        name: String,
        expected: FieldKind,
        actual: FieldKind,
    },
}

/// Errors that can occur during the build step
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Empty command line")]
    EmptyCommand,

    #[error("Failed to start '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command {} failed with {}", .0.display_argv(), .0.status_text())]
    CommandFailed(ProcessOutcome),

    #[error("Base build step failed: {message}")]
    BaseBuild {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl BuildError {
    /// Create a base build error without an underlying cause
    pub fn base_build(message: impl Into<String>) -> Self {
        Self::BaseBuild {
            message: message.into(),
            source: None,
        }
    }

    /// Outcome of the failed process, if one ran
    pub fn outcome(&self) -> Option<&ProcessOutcome> {
        match self {
            Self::CommandFailed(outcome) => Some(outcome),
            _ => None,
        }
    }
}
