//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary directory
//! - Command builders isolated from the caller's `ENVINI_*` settings
//! - Target file fixtures

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Settings variables the binary reads; cleared so the host environment
/// cannot leak into tests.
const SETTINGS_VARS: &[&str] = &[
    "ENVINI_LOG_MODE",
    "ENVINI_KEYPREFIX",
    "ENVINI_REPLACE",
    "ENVINI_LENIENT",
    "ENVINI_IGNORE_MALFORMED",
];

/// Test environment with an isolated working directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the target INI file (not created until written)
    pub target: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment whose target does not exist yet.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let target = temp_path.join("app.ini");

        Self {
            temp_dir,
            temp_path,
            target,
        }
    }

    /// Create a test environment whose target holds `contents`.
    pub fn with_target(contents: &str) -> Self {
        let env = Self::new();
        env.write_target(contents);
        env
    }

    /// Get a bare command builder with settings variables cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("envini").expect("Failed to find envini binary");
        for var in SETTINGS_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with `--keyprefix MYAPP` and the target set.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--keyprefix").arg("MYAPP").arg(&self.target);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Overwrite the target file.
    pub fn write_target(&self, contents: &str) {
        fs::write(&self.target, contents).expect("Failed to write target");
    }

    /// Read the target file.
    pub fn read_target(&self) -> String {
        fs::read_to_string(&self.target).expect("Failed to read target")
    }

    /// Names of all entries in the temporary directory, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.temp_path)
            .expect("Failed to list temp dir")
            .map(|e| {
                e.expect("Bad dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Run with the given variables and return stdout, asserting success.
    pub fn patch(&self, vars: &[(&str, &str)]) -> String {
        let output = self
            .command()
            .envs(vars.iter().copied())
            .output()
            .expect("Failed to run envini");

        assert!(
            output.status.success(),
            "envini failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
