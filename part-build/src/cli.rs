//! Command-line arguments

use crate::tracing_support::TracingFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "part-build", version, about = "Build project parts with part plugins")]
pub struct Cli {
    /// Project file describing the parts
    #[arg(short, long, global = true, default_value = "snapcraft.yaml", env = "PART_BUILD_FILE")]
    pub file: PathBuf,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = TracingFormat::Pretty)]
    pub log_format: TracingFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available plugins
    Plugins,

    /// Print a plugin's manifest and option schema as JSON
    Schema {
        /// Plugin name
        plugin: String,
    },

    /// Print the build environment of a part
    Env {
        /// Part name
        part: String,
    },

    /// Build parts (all parts when none are named)
    Build {
        /// Parts to build
        parts: Vec<String>,

        /// Capture command output and print it after each part finishes
        #[arg(long)]
        capture: bool,
    },
}
