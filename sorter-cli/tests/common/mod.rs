//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated data directory plus a separate folder to sort, and
//! command builders that point the binary at them.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host settings into a test run.
const SORTER_ENV: [&str; 12] = [
    "SORTER_DATA_DIR",
    "SORTER_BUSY_TIMEOUT",
    "SORTER_LOG_MODE",
    "SORTER_OUTPUT_FORMAT",
    "SORTER_OWNERSHIP_MARKER",
    "SORTER_IGNORE_MARKER",
    "SORTER_RECURSIVE",
    "SORTER_GROUP",
    "SORTER_BY_EXTENSION",
    "SORTER_FILE_TYPES",
    "SORTER_MAX_NAME_ATTEMPTS",
    "SORTER_MAXIMUM_LOCK_WAIT_SECONDS",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Folder the tests sort
    pub inbox: PathBuf,
    /// Path to the sorter data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The inbox exists and is empty; the data directory is created by the
    /// binary on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let inbox = temp_dir.path().join("inbox");
        std::fs::create_dir_all(&inbox).expect("Failed to create inbox");
        let data_dir = temp_dir.path().join("sorter-data");

        Self {
            temp_dir,
            inbox,
            data_dir,
        }
    }

    /// A command with only the binary and a scrubbed environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("sorter").expect("Failed to find sorter binary");
        for var in SORTER_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A `sort` command over the inbox.
    pub fn sort(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("sort").arg(&self.inbox);
        cmd
    }

    /// Path of `rel` inside the inbox.
    pub fn inbox_path(&self, rel: &str) -> PathBuf {
        self.inbox.join(rel)
    }

    /// Write a file into the inbox, creating parents.
    pub fn write(&self, rel: &str) -> PathBuf {
        let path = self.inbox_path(rel);
        std::fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create parent");
        std::fs::write(&path, rel).expect("Failed to write file");
        path
    }

    /// Path of the history database.
    pub fn database(&self) -> PathBuf {
        self.data_dir.join("sorter.db")
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        let path = self.data_dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}
