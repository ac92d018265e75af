//! Common test utilities shared across integration tests.
//!
//! Clippy cannot track usage across integration test files,
//! hence the `allow(dead_code)` annotation.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("datefield").join("config.toml");

        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn write_config(&self, content: &str) {
        let parent = self.config_path.parent().expect("config path has a parent");
        fs::create_dir_all(parent).expect("Failed to create config dir");
        fs::write(&self.config_path, content).expect("Failed to write config");
    }

    pub fn read_config(&self) -> String {
        fs::read_to_string(&self.config_path).expect("Failed to read config")
    }

    /// Command with the config file and process locale pinned to the fixture
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("datefield").expect("Failed to find datefield binary");
        cmd.env("DATEFIELD_CONFIG", &self.config_path)
            .env("LC_ALL", "en_US.UTF-8")
            .env_remove("LC_TIME")
            .env_remove("LANG")
            .env_remove("DATEFIELD_LOG");
        cmd
    }
}
