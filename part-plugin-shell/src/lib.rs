//! Shell Plugin - runs a command through a configurable shell
//!
//! ```yaml
//! parts:
//!   hello:
//!     plugin: shell
//!     shell: /bin/bash
//!     shell-flags: ["-e", "-x"]
//!     shell-command: ./configure && make
//! ```
//!
//! The build runs `[shell] + shell-flags + ["-c", shell-command]` and exports
//! `SNAPDIR`, the directory the build was started from.

use part_plugin_api::{
    BuildError, BuildHost, Environment, FieldSpec, OptionsError, PartOptions, Plugin,
    PluginSchema, ProcessOutcome,
};
use std::path::Path;

pub const SHELL: &str = "shell";
pub const SHELL_FLAGS: &str = "shell-flags";
pub const SHELL_COMMAND: &str = "shell-command";

/// Shell used when the part does not set one
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Variable holding the working directory of the build
pub const SNAPDIR: &str = "SNAPDIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellPlugin {
    pub shell: String,
    pub shell_flags: Vec<String>,
    pub shell_command: String,
}

impl ShellPlugin {
    /// Command line handed to the host
    pub fn command_line(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.shell_flags.len() + 3);
        argv.push(self.shell.clone());
        argv.extend(self.shell_flags.iter().cloned());
        argv.push("-c".to_string());
        argv.push(self.shell_command.clone());
        argv
    }
}

impl Plugin for ShellPlugin {
    const NAME: &'static str = "shell";

    fn describe_schema() -> PluginSchema {
        PluginSchema::new()
            .field(
                FieldSpec::string(SHELL)
                    .required()
                    .default(DEFAULT_SHELL)
                    .help("Shell used to run the command"),
            )
            .field(
                FieldSpec::string_array(SHELL_FLAGS)
                    .default(Vec::<String>::new())
                    .help("Flags passed to the shell before -c"),
            )
            .field(
                FieldSpec::string(SHELL_COMMAND)
                    .required()
                    .help("Command string run by the shell"),
            )
            .build_property(SHELL)
            .build_property(SHELL_FLAGS)
            .build_property(SHELL_COMMAND)
    }

    fn from_options(options: &PartOptions) -> Result<Self, OptionsError> {
        Ok(Self {
            shell: options.string(SHELL)?.to_string(),
            shell_flags: options.strings(SHELL_FLAGS)?.to_vec(),
            shell_command: options.string(SHELL_COMMAND)?.to_string(),
        })
    }

    fn compute_environment(&self, _root: &Path, base: &Environment, cwd: &Path) -> Environment {
        base.clone().with(SNAPDIR, cwd.to_string_lossy().into_owned())
    }

    fn run_build(&self, host: &mut dyn BuildHost) -> Result<ProcessOutcome, BuildError> {
        host.base_build()?;
        host.run(&self.command_line())
    }
}
