//! Integration tests for the part-build binary

#![cfg(unix)]

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::process::{Command, Output};

const PROJECT: &str = r#"
name: demo
parts:
  hello:
    plugin: shell
    shell-flags: ["-e"]
    shell-command: echo "built in $SNAPDIR"
  broken:
    plugin: shell
    shell-command: exit 7
  loud:
    plugin: shell
    shell-command: echo diagnostic-output; echo diagnostic-error >&2; exit 5
"#;

fn part_build_command(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_part-build"));
    command
        .args(args)
        .current_dir(dir)
        .env_remove("PART_BUILD_FILE")
        .env("RUST_LOG", "warn");
    command
}

fn part_build(dir: &Path, args: &[&str]) -> Output {
    part_build_command(dir, args)
        .output()
        .expect("Failed to run part-build")
}

fn project_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("snapcraft.yaml"), PROJECT).unwrap();
    dir
}

#[test]
fn test_plugins_lists_shell() {
    let dir = project_dir();
    let output = part_build(dir.path(), &["plugins"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "shell\n");
}

#[test]
fn test_schema_is_json() {
    let dir = project_dir();
    let output = part_build(dir.path(), &["schema", "shell"]);

    assert!(output.status.success());
    let manifest: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(manifest["name"], "shell");
    assert_eq!(manifest["schema"]["fields"][0]["name"], "shell");
    assert_eq!(manifest["schema"]["fields"][0]["default"], "/bin/sh");
    assert_eq!(manifest["schema"]["fields"][2]["required"], true);
}

#[test]
fn test_build_prints_captured_output() {
    let dir = project_dir();
    let output = part_build(dir.path(), &["build", "hello", "--capture"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected_dir = dir.path().canonicalize().unwrap();
    assert_eq!(stdout, format!("built in {}\n", expected_dir.display()));
}

#[test]
fn test_failed_build_exits_with_child_status() {
    let dir = project_dir();
    let output = part_build(dir.path(), &["build", "broken"]);

    assert_eq!(output.status.code(), Some(7));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken"), "stderr: {}", stderr);
}

#[test]
fn test_failed_capture_prints_all_output() {
    let dir = project_dir();
    let output = part_build(dir.path(), &["build", "hello", "loud", "--capture"]);

    assert_eq!(output.status.code(), Some(5));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected_dir = dir.path().canonicalize().unwrap();
    assert_eq!(
        stdout,
        format!("built in {}\ndiagnostic-output\n", expected_dir.display())
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("diagnostic-error"), "stderr: {}", stderr);
    assert_eq!(
        stderr.matches("failed with exit code 5").count(),
        1,
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_non_utf8_environment_is_skipped() {
    let dir = project_dir();
    let output = part_build_command(dir.path(), &["env", "hello"])
        .env("PART_BUILD_BAD_VALUE", OsStr::from_bytes(b"\xff\xfe"))
        .env("PART_BUILD_GOOD_VALUE", "kept")
        .output()
        .expect("Failed to run part-build");

    assert!(output.status.success(), "status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PART_BUILD_GOOD_VALUE=kept\n"), "stdout: {}", stdout);
    assert!(!stdout.contains("PART_BUILD_BAD_VALUE"), "stdout: {}", stdout);
    assert!(stdout.ends_with(&format!(
        "SNAPDIR={}\n",
        dir.path().canonicalize().unwrap().display()
    )));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PART_BUILD_BAD_VALUE"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_part() {
    let dir = project_dir();
    let output = part_build(dir.path(), &["env", "missing"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown part: missing"));
}
