//! Contracts between a build host and its part plugins
//!
//! The lifecycle of a plugin is linear:
//!
//! ```text
//! describe_schema ──▶ (host validates) ──▶ from_options ──▶ compute_environment ──▶ run_build
//! ```
//!
//! [`Plugin`] is what plugin authors implement. Hosts hold plugins as
//! `Box<dyn PartPlugin>`, which every [`Plugin`] gets through a blanket impl.

use crate::env::Environment;
use crate::error::{BuildError, OptionsError};
use crate::options::PartOptions;
use crate::outcome::ProcessOutcome;
use crate::schema::PluginSchema;
use std::path::Path;

/// Capabilities the host lends to a plugin during its build step
pub trait BuildHost {
    /// Run the host's own build preparation
    fn base_build(&mut self) -> Result<(), BuildError>;

    /// Run a command line to completion
    ///
    /// Returns `Err(BuildError::CommandFailed)` when the process exits non-zero.
    fn run(&mut self, argv: &[String]) -> Result<ProcessOutcome, BuildError>;
}

/// Trait that part plugins implement
pub trait Plugin: Sized {
    /// Name used in the `plugin:` key of a part
    const NAME: &'static str;

    /// Options accepted by this plugin
    fn describe_schema() -> PluginSchema;

    /// Construct an instance from validated options
    fn from_options(options: &PartOptions) -> Result<Self, OptionsError>;

    /// Build environment for this part
    ///
    /// `root` is the part's install root, `cwd` the working directory the
    /// build runs in.
    fn compute_environment(&self, root: &Path, base: &Environment, cwd: &Path) -> Environment;

    /// Perform the build
    fn run_build(&self, host: &mut dyn BuildHost) -> Result<ProcessOutcome, BuildError>;
}

/// Object-safe view of a constructed plugin
pub trait PartPlugin {
    fn name(&self) -> &'static str;

    fn compute_environment(&self, root: &Path, base: &Environment, cwd: &Path) -> Environment;

    fn run_build(&self, host: &mut dyn BuildHost) -> Result<ProcessOutcome, BuildError>;
}

impl<P: Plugin> PartPlugin for P {
    fn name(&self) -> &'static str {
        P::NAME
    }

    fn compute_environment(&self, root: &Path, base: &Environment, cwd: &Path) -> Environment {
        Plugin::compute_environment(self, root, base, cwd)
    }

    fn run_build(&self, host: &mut dyn BuildHost) -> Result<ProcessOutcome, BuildError> {
        Plugin::run_build(self, host)
    }
}
