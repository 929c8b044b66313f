//! Part lifecycle driver
//!
//! For each part: validate and construct the plugin, compute its build
//! environment, then hand it a [`ProcessRunner`] for the build step. Nothing
//! is spawned until validation and construction have succeeded.

use crate::project::{PartDefinition, Project, ProjectError};
use crate::registry::{PluginRegistry, RegistryError};
use crate::runner::{OutputMode, PartDirs, ProcessRunner};
use part_plugin_api::{BuildError, Environment, PartPlugin, ProcessOutcome};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while driving a part through its lifecycle
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Part '{part}' could not be set up")]
    Registry {
        part: String,
        #[source]
        source: RegistryError,
    },

    #[error("Part '{part}' failed to build")]
    Build {
        part: String,
        #[source]
        source: BuildError,
    },

    #[error("Project directory {} is not valid UTF-8", .0.display())]
    NonUtf8ProjectDir(PathBuf),

    #[error(transparent)]
    Project(#[from] ProjectError),
}

impl LifecycleError {
    /// Outcome of the failed build command, if the failure came from one
    pub fn outcome(&self) -> Option<&ProcessOutcome> {
        match self {
            Self::Build { source, .. } => source.outcome(),
            _ => None,
        }
    }
}

/// Builds parts of a project with the plugins of a registry
pub struct PartBuilder<'r> {
    registry: &'r PluginRegistry,
    project_dir: PathBuf,
    base_env: Environment,
    output: OutputMode,
}

impl<'r> PartBuilder<'r> {
    /// `project_dir` is both the build's working directory and the
    /// parent of the `parts/` tree.
    pub fn new(registry: &'r PluginRegistry, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            project_dir: project_dir.into(),
            base_env: Environment::new(),
            output: OutputMode::default(),
        }
    }

    /// Environment inherited by every part
    pub fn with_base_env(mut self, env: Environment) -> Self {
        self.base_env = env;
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Directories of a part
    pub fn part_dirs(&self, part: &PartDefinition) -> PartDirs {
        PartDirs::new(&self.project_dir.join("parts"), &part.name)
    }

    /// Build environment of a part, without building it
    pub fn environment(&self, part: &PartDefinition) -> Result<Environment, LifecycleError> {
        self.check_project_dir()?;
        let plugin = self.instantiate(part)?;
        Ok(self.compute_environment(plugin.as_ref(), part))
    }

    /// Build one part
    pub fn build(&self, part: &PartDefinition) -> Result<ProcessOutcome, LifecycleError> {
        self.check_project_dir()?;
        let plugin = self.instantiate(part)?;
        let env = self.compute_environment(plugin.as_ref(), part);

        let mut runner = ProcessRunner::new(env, &self.project_dir)
            .with_part_dirs(self.part_dirs(part))
            .with_output(self.output);

        tracing::info!(part = %part.name, plugin = plugin.name(), "Building part");
        let outcome = plugin
            .run_build(&mut runner)
            .map_err(|source| LifecycleError::Build {
                part: part.name.clone(),
                source,
            })?;
        tracing::info!(part = %part.name, "Part built");
        Ok(outcome)
    }

    /// Build the named parts (all parts when `names` is empty) in file order
    ///
    /// Stops at the first failure.
    pub fn build_all(
        &self,
        project: &Project,
        names: &[String],
    ) -> Result<Vec<ProcessOutcome>, LifecycleError> {
        let mut outcomes = Vec::new();
        self.build_each(project, names, |_, outcome| outcomes.push(outcome))?;
        Ok(outcomes)
    }

    /// Like [`PartBuilder::build_all`], handing each outcome to `on_built`
    /// as soon as its part has finished
    ///
    /// Parts built before a failure have already been reported when the
    /// error is returned.
    pub fn build_each<F>(
        &self,
        project: &Project,
        names: &[String],
        mut on_built: F,
    ) -> Result<(), LifecycleError>
    where
        F: FnMut(&PartDefinition, ProcessOutcome),
    {
        for part in project.select(names)? {
            let outcome = self.build(part)?;
            on_built(part, outcome);
        }
        Ok(())
    }

    // SNAPDIR must name the working directory exactly
    fn check_project_dir(&self) -> Result<(), LifecycleError> {
        match self.project_dir.to_str() {
            Some(_) => Ok(()),
            None => Err(LifecycleError::NonUtf8ProjectDir(self.project_dir.clone())),
        }
    }

    fn instantiate(&self, part: &PartDefinition) -> Result<Box<dyn PartPlugin>, LifecycleError> {
        self.registry
            .instantiate(&part.plugin, &part.properties)
            .map_err(|source| LifecycleError::Registry {
                part: part.name.clone(),
                source,
            })
    }

    fn compute_environment(&self, plugin: &dyn PartPlugin, part: &PartDefinition) -> Environment {
        let root = self.part_dirs(part).install;
        let env = plugin.compute_environment(&root, &self.base_env, &self.project_dir);
        tracing::debug!(part = %part.name, vars = env.len(), "Computed build environment");
        env
    }
}
