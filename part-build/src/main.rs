//! part-build: build the parts of a snapcraft-style project
//!
//! ```text
//! part-build plugins
//! part-build schema shell
//! part-build --file snapcraft.yaml env hello
//! part-build build hello --capture
//! ```

mod cli;
mod tracing_support;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use part_plugin_host::{
    Environment, LifecycleError, OutputMode, PartBuilder, PluginRegistry, ProcessOutcome, Project,
};
use part_plugin_shell::ShellPlugin;
use std::process::ExitCode;
use tracing_support::{init_subscriber_with_config, TracingConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_subscriber_with_config(
        TracingConfig {
            format: cli.log_format,
            ..Default::default()
        }
        .with_verbosity(cli.verbose),
    );

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Plugins available to every project
fn builtin_registry() -> PluginRegistry {
    PluginRegistry::new().with::<ShellPlugin>()
}

fn run(cli: Cli) -> Result<()> {
    let registry = builtin_registry();

    match cli.command {
        Command::Plugins => {
            for name in registry.list_plugins() {
                println!("{}", name);
            }
        }
        Command::Schema { plugin } => {
            let manifest = registry
                .manifest(&plugin)
                .with_context(|| format!("Unknown plugin '{}'", plugin))?;
            println!("{}", serde_json::to_string_pretty(manifest)?);
        }
        Command::Env { part } => {
            let project = load_project(&cli.file)?;
            let builder = part_builder(&registry)?;
            let env = builder.environment(project.part(&part)?)?;
            for assignment in env.to_assignments() {
                println!("{}", assignment);
            }
        }
        Command::Build { parts, capture } => {
            let project = load_project(&cli.file)?;
            let output = if capture {
                OutputMode::Capture
            } else {
                OutputMode::Inherit
            };
            let builder = part_builder(&registry)?.with_output(output);

            let built = builder.build_each(&project, &parts, |_, outcome| print_output(&outcome));
            if let Some(outcome) = built.as_ref().err().and_then(LifecycleError::outcome) {
                print_output(outcome);
            }
            built?;
        }
    }

    Ok(())
}

fn load_project(path: &std::path::Path) -> Result<Project> {
    Project::load(path).with_context(|| format!("Failed to load project {}", path.display()))
}

fn part_builder(registry: &PluginRegistry) -> Result<PartBuilder<'_>> {
    let project_dir = std::env::current_dir().context("Failed to get current directory")?;
    let (base_env, skipped) = Environment::from_os_vars(std::env::vars_os());
    for name in skipped {
        tracing::warn!(
            variable = %name.to_string_lossy(),
            "Skipping environment variable that is not valid UTF-8"
        );
    }
    Ok(PartBuilder::new(registry, project_dir).with_base_env(base_env))
}

/// Print the output a build command captured
fn print_output(outcome: &ProcessOutcome) {
    if let Some(stdout) = &outcome.stdout {
        print!("{}", stdout);
    }
    if let Some(stderr) = &outcome.stderr {
        eprint!("{}", stderr);
    }
}

/// Exit status for a failed run: a failed build command's own exit code
/// when there is one, otherwise 1
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<LifecycleError>()
        .and_then(LifecycleError::outcome)
        .and_then(|outcome| outcome.exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
