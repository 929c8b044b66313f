//! Tracing and logging support.
//!
//! Structured logging for the build front end. Levels come from `RUST_LOG`
//! unless the command line asks for more verbosity.

use clap::ValueEnum;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TracingFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,

    /// Compact single-line format.
    Compact,

    /// JSON format (one object per line).
    Json,
}

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter.
    ///
    /// If None, uses RUST_LOG environment variable or defaults to "info".
    pub level: Option<tracing::Level>,

    /// Output format.
    pub format: TracingFormat,

    /// Include target module names in output.
    pub target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: TracingFormat::Pretty,
            target: false,
        }
    }
}

impl TracingConfig {
    /// Level implied by the number of `-v` flags
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        self.level = match verbose {
            0 => None,
            1 => Some(tracing::Level::DEBUG),
            _ => Some(tracing::Level::TRACE),
        };
        self
    }

    fn filter(&self) -> EnvFilter {
        match self.level {
            Some(level) => EnvFilter::new(level.to_string()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }
}

/// Initialize tracing subscriber with custom configuration.
///
/// Logs go to stderr so that command output on stdout stays clean.
pub fn init_subscriber_with_config(config: TracingConfig) {
    let filter = config.filter();
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.target);

    match config.format {
        TracingFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer.pretty())
            .init(),
        TracingFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        TracingFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
    }
}
