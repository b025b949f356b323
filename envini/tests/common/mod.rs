//! Common test utilities for integration tests.
//!
//! This module provides a fixture for running the patch pipeline against
//! a target file in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use envini::settings::{MalformedPolicy, OutputMode};
use envini::{
    DeletePolicy, EnvSnapshot, LogLevel, Logger, PatchOperation, PatchOutcome, Result, Settings,
};

/// Prefix used by the fixtures.
pub const PREFIX: &str = "MYAPP";

/// A target file in its own temporary directory.
pub struct Fixture {
    dir: TempDir,
    target: PathBuf,
}

impl Fixture {
    /// Creates a fixture whose target does not exist yet.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temporary directory");
        let target = dir.path().join("app.ini");
        Self { dir, target }
    }

    /// Creates a fixture whose target holds `contents`.
    pub fn with_contents(contents: &str) -> Self {
        let fixture = Self::empty();
        fs::write(&fixture.target, contents).expect("failed to write fixture");
        fixture
    }

    /// Path of the target file.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Current contents of the target file.
    pub fn contents(&self) -> String {
        fs::read_to_string(&self.target).expect("failed to read target")
    }

    /// Names of all files in the fixture directory.
    #[allow(dead_code)]
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .expect("failed to list fixture directory")
            .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Default settings for this fixture: stdout, strict, abort.
    pub fn settings(&self) -> Settings {
        Settings {
            target: self.target.clone(),
            prefix: PREFIX.to_string(),
            output: OutputMode::Stdout,
            delete_policy: DeletePolicy::Strict,
            malformed: MalformedPolicy::Abort,
        }
    }

    /// Runs the pipeline and returns the outcome with captured stdout.
    pub fn run(&self, settings: &Settings, vars: &[(&str, &str)]) -> (Result<PatchOutcome>, String) {
        let logger = Logger::new(LogLevel::Quiet);
        let snapshot = EnvSnapshot::from_pairs(vars.iter().copied());
        let mut out = Vec::new();
        let result = PatchOperation::new(settings, &logger).run(&snapshot, &mut out);
        (result, String::from_utf8(out).expect("output is UTF-8"))
    }
}
