//! Test support utilities for credhub-client integration tests.
//!
//! Provides a recording transport, JSON fixtures and CLI helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
pub mod transport;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use transport::*;

use assert_cmd::Command;
use tempfile::TempDir;

/// CLI test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir so no real
/// `credhub.toml` is picked up. Child processes use `.current_dir()`
/// so tests can run in parallel.
pub struct Test {
    /// Working directory for the command
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        Self { dir, home }
    }

    /// Create a credhub command with an isolated environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("credhub").expect("failed to find credhub binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("CREDHUB_URL");
        cmd.env_remove("CREDHUB_TOKEN");
        cmd.env_remove("CREDHUB_CONFIG");
        cmd.env_remove("CREDHUB_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Write `credhub.toml` into the working directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir.path().join("credhub.toml"), contents)
            .expect("failed to write credhub.toml");
    }
}
