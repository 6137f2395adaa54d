//! Shared test utilities for replbuild integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write project fixtures (files, project file) into temp directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - The global settings file points at a path that does not exist unless overridden.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns a hermetic `replbuild` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `REPLBUILD_SETTINGS_PATH` names a missing file so user settings never apply.
/// - Other replbuild env vars and `RUST_LOG` are cleared.
pub fn replbuild_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("replbuild");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    let missing = std::env::temp_dir().join("replbuild-tests-no-such-settings.json");
    cmd.env("REPLBUILD_SETTINGS_PATH", missing);

    // Clear potential host leakage
    cmd.env_remove("REPLBUILD_PROJECT_FILE").env_remove("RUST_LOG");

    cmd
}

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Write a project file with the given folders and settings.
#[allow(dead_code)]
pub fn write_project_file(root: &Path, folders: &[&str], settings: Value) -> PathBuf {
    let folders: Vec<Value> = folders
        .iter()
        .map(|folder| serde_json::json!({ "path": folder }))
        .collect();
    let project = serde_json::json!({ "folders": folders, "settings": settings });
    write_file(root, "app.project.json", &project.to_string())
}

/// Parse the JSON launch request printed by `repl --dry-run`.
#[allow(dead_code)]
pub fn dry_run_request(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("dry run output should be JSON")
}
