//! Result of an external process run by the host

use serde::{Deserialize, Serialize};

/// What happened when the host ran a command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Command line that was executed
    pub argv: Vec<String>,

    /// Exit code, absent when the process was terminated by a signal
    pub exit_code: Option<i32>,

    /// Terminating signal, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,

    /// Captured standard output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,

    /// Captured standard error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl ProcessOutcome {
    /// Outcome of a process that exited with `code` and whose output was not captured
    pub fn exited(argv: Vec<String>, code: i32) -> Self {
        Self {
            argv,
            exit_code: Some(code),
            signal: None,
            stdout: None,
            stderr: None,
        }
    }

    /// Attach captured output
    pub fn with_output(mut self, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self.stderr = Some(stderr.into());
        self
    }

    /// True only for a clean exit with status 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Command line joined with spaces, for messages
    pub fn display_argv(&self) -> String {
        format!("{:?}", self.argv.join(" "))
    }

    /// Human readable exit status
    pub fn status_text(&self) -> String {
        match (self.exit_code, self.signal) {
            (Some(code), _) => format!("exit code {}", code),
            (None, Some(signal)) => format!("signal {}", signal),
            (None, None) => "unknown status".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_success_requires_zero_exit() {
        assert!(ProcessOutcome::exited(argv(&["true"]), 0).success());
        assert!(!ProcessOutcome::exited(argv(&["false"]), 1).success());

        let killed = ProcessOutcome {
            argv: argv(&["sleep", "10"]),
            exit_code: None,
            signal: Some(9),
            stdout: None,
            stderr: None,
        };
        assert!(!killed.success());
        assert_eq!(killed.status_text(), "signal 9");
    }

    #[test]
    fn test_display() {
        let outcome = ProcessOutcome::exited(argv(&["/bin/sh", "-c", "exit 1"]), 1);
        assert_eq!(outcome.display_argv(), "\"/bin/sh -c exit 1\"");
        assert_eq!(outcome.status_text(), "exit code 1");
    }
}
