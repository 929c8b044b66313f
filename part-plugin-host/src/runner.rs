//! Process runner lent to plugins as their [`BuildHost`]
//!
//! Commands run synchronously: one child process at a time, with exactly the
//! computed build environment and the configured working directory.

use part_plugin_api::{BuildError, BuildHost, Environment, ProcessOutcome};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// What to do with the output of build commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Child shares the host's stdout and stderr
    #[default]
    Inherit,

    /// Output is collected into the [`ProcessOutcome`]
    Capture,
}

/// Directories owned by a part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDirs {
    pub build: PathBuf,
    pub install: PathBuf,
}

impl PartDirs {
    /// Standard layout: `<parts_dir>/<name>/{build,install}`
    pub fn new(parts_dir: &Path, part_name: &str) -> Self {
        let root = parts_dir.join(part_name);
        Self {
            build: root.join("build"),
            install: root.join("install"),
        }
    }
}

/// Runs build commands for one part
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    env: Environment,
    cwd: PathBuf,
    dirs: Option<PartDirs>,
    output: OutputMode,
}

impl ProcessRunner {
    pub fn new(env: Environment, cwd: impl Into<PathBuf>) -> Self {
        Self {
            env,
            cwd: cwd.into(),
            dirs: None,
            output: OutputMode::default(),
        }
    }

    /// Directories prepared by [`BuildHost::base_build`]
    pub fn with_part_dirs(mut self, dirs: PartDirs) -> Self {
        self.dirs = Some(dirs);
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn working_directory(&self) -> &Path {
        &self.cwd
    }
}

impl BuildHost for ProcessRunner {
    fn base_build(&mut self) -> Result<(), BuildError> {
        let Some(dirs) = &self.dirs else {
            return Ok(());
        };

        for dir in [&dirs.build, &dirs.install] {
            std::fs::create_dir_all(dir).map_err(|e| BuildError::BaseBuild {
                message: format!("cannot create {}", dir.display()),
                source: Some(e),
            })?;
        }

        tracing::debug!(
            build = %dirs.build.display(),
            install = %dirs.install.display(),
            "Part directories ready"
        );
        Ok(())
    }

    fn run(&mut self, argv: &[String]) -> Result<ProcessOutcome, BuildError> {
        let (program, args) = argv.split_first().ok_or(BuildError::EmptyCommand)?;

        tracing::info!(?argv, cwd = %self.cwd.display(), "Running command");

        let mut command = Command::new(program);
        command
            .args(args)
            .env_clear()
            .envs(self.env.iter())
            .current_dir(&self.cwd);

        let launch_error = |source: std::io::Error| BuildError::Launch {
            program: program.clone(),
            source,
        };

        let outcome = match self.output {
            OutputMode::Inherit => {
                let status = command.status().map_err(launch_error)?;
                outcome_from_status(argv, status)
            }
            OutputMode::Capture => {
                let output = command.output().map_err(launch_error)?;
                outcome_from_status(argv, output.status).with_output(
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                )
            }
        };

        if outcome.success() {
            tracing::debug!(?argv, "Command succeeded");
            Ok(outcome)
        } else {
            tracing::warn!(
                ?argv,
                exit_code = ?outcome.exit_code,
                signal = ?outcome.signal,
                "Command failed"
            );
            Err(BuildError::CommandFailed(outcome))
        }
    }
}

fn outcome_from_status(argv: &[String], status: ExitStatus) -> ProcessOutcome {
    ProcessOutcome {
        argv: argv.to_vec(),
        exit_code: status.code(),
        signal: terminating_signal(&status),
        stdout: None,
        stderr: None,
    }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    fn runner(dir: &Path, env: Environment) -> ProcessRunner {
        ProcessRunner::new(env, dir).with_output(OutputMode::Capture)
    }

    fn base_env() -> Environment {
        Environment::new().with("PATH", "/usr/bin:/bin")
    }

    #[test]
    fn test_run_success_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path(), base_env());

        let outcome = runner.run(&argv(&["/bin/sh", "-c", "echo hi"])).unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.stdout.as_deref(), Some("hi\n"));
        assert_eq!(outcome.stderr.as_deref(), Some(""));
    }

    #[test]
    fn test_run_non_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path(), base_env());

        let err = runner.run(&argv(&["/bin/sh", "-c", "exit 3"])).unwrap_err();

        match err {
            BuildError::CommandFailed(outcome) => {
                assert_eq!(outcome.exit_code, Some(3));
                assert_eq!(outcome.signal, None);
                assert_eq!(outcome.argv, argv(&["/bin/sh", "-c", "exit 3"]));
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_run_killed_by_signal() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path(), base_env());

        let err = runner.run(&argv(&["/bin/sh", "-c", "kill -9 $$"])).unwrap_err();

        let outcome = err.outcome().unwrap();
        assert_eq!(outcome.exit_code, None);
        assert_eq!(outcome.signal, Some(9));
    }

    #[test]
    fn test_run_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path(), base_env());

        let err = runner
            .run(&argv(&["/nonexistent/shell", "-c", "true"]))
            .unwrap_err();

        match err {
            BuildError::Launch { program, .. } => assert_eq!(program, "/nonexistent/shell"),
            other => panic!("Expected Launch, got {:?}", other),
        }
    }

    #[test]
    fn test_run_empty_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path(), base_env());

        assert!(matches!(runner.run(&[]), Err(BuildError::EmptyCommand)));
    }

    #[test]
    fn test_run_uses_exact_environment_and_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let env = base_env().with("SNAPDIR", "/somewhere");
        let mut runner = runner(dir.path(), env);

        let outcome = runner
            .run(&argv(&[
                "/bin/sh",
                "-c",
                "echo \"$SNAPDIR:${HOME-unset}\"; pwd -P",
            ]))
            .unwrap();

        let expected_cwd = dir.path().canonicalize().unwrap();
        assert_eq!(
            outcome.stdout.unwrap(),
            format!("/somewhere:unset\n{}\n", expected_cwd.display())
        );
    }

    #[test]
    fn test_base_build_creates_part_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = PartDirs::new(&dir.path().join("parts"), "hello");
        let mut runner = runner(dir.path(), base_env()).with_part_dirs(dirs.clone());

        runner.base_build().unwrap();

        assert!(dirs.build.is_dir());
        assert!(dirs.install.is_dir());
        assert!(dirs.build.ends_with("parts/hello/build"));
    }

    #[test]
    fn test_base_build_without_dirs_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = runner(dir.path(), base_env());
        assert!(runner.base_build().is_ok());
    }
}
