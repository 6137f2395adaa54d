//! Integration tests for `replbuild repl`.
//!
//! Responsibilities:
//! - Validate command-line assembly through `--dry-run` output.
//! - Validate settings precedence (project file, global file, `--set`).
//! - Validate environment merging from `.env` files and project `env` settings.
//!
//! Invariants:
//! - All tests use the hermetic `replbuild_cmd()` helper.
//! - Tests that start real processes only run on unix.

mod common;

use common::{dry_run_request, replbuild_cmd, write_file, write_project_file};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_repl_help() {
    replbuild_cmd()
        .args(["repl", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--pytest")
                .and(predicate::str::contains("--poetry"))
                .and(predicate::str::contains("--dry-run"))
                .and(predicate::str::contains("--exit-first")),
        );
}

#[test]
fn test_dry_run_plain_repl() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "proj/src/a.py", "print('hi')\n");

    let output = replbuild_cmd()
        .args(["repl", "--dry-run"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let request = dry_run_request(&output.stdout);
    assert_eq!(
        request["cmd"],
        json!(["python3.11", "-i", file.display().to_string()])
    );
    assert_eq!(
        request["cwd"],
        json!(file.parent().unwrap().display().to_string())
    );
    assert_eq!(request["encoding"], json!("utf-8"));
    assert_eq!(request["external_id"], json!("REPL"));
    assert_eq!(request["env"], json!({}));
}

#[test]
fn test_dry_run_loads_env_file_from_project_folder() {
    let temp_dir = TempDir::new().unwrap();
    let proj = temp_dir.path().join("proj");
    write_file(&proj, ".env", "FOO=bar\n# comment\nBAZ=\"q=1\"\nNOEQUALS\n");
    let file = write_file(&proj, "src/a.py", "");

    let output = replbuild_cmd()
        .arg("--project-folder")
        .arg(&proj)
        .args(["repl", "--dry-run"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let request = dry_run_request(&output.stdout);
    assert_eq!(request["env"], json!({ "FOO": "bar", "BAZ": "q=1" }));
}

#[test]
fn test_dry_run_pytest_with_project_file_settings() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "app/.env", "FOO=from-file\n");
    let file = write_file(root, "app/tests/test_a.py", "");
    let project = write_project_file(
        root,
        &["app"],
        json!({
            "replbuild.pythonPath": "/venv/bin/python",
            "env": { "FOO": "from-settings", "DEBUG": 1 }
        }),
    );

    let output = replbuild_cmd()
        .arg("--project-file")
        .arg(&project)
        .args([
            "repl",
            "--dry-run",
            "--pytest",
            "--collect-only",
            "--exit-first",
            "--approvals-update",
        ])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let request = dry_run_request(&output.stdout);
    assert_eq!(
        request["cmd"],
        json!([
            "/venv/bin/python",
            "-i",
            "-m",
            "pytest",
            "-vvv",
            "-s",
            "--collect-only",
            "--exitfirst",
            "--approvals-update",
            file.display().to_string()
        ])
    );
    assert_eq!(request["env"], json!({ "FOO": "from-settings", "DEBUG": "1" }));
}

#[test]
fn test_project_settings_win_over_global_settings() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let global = write_file(
        root,
        "global.json",
        &json!({
            "replbuild.pythonPath": "global-python",
            "replbuild.poetryPath": "global-poetry"
        })
        .to_string(),
    );
    let project = write_project_file(root, &[], json!({ "replbuild.pythonPath": "project-python" }));

    let output = replbuild_cmd()
        .env("REPLBUILD_SETTINGS_PATH", &global)
        .env("REPLBUILD_PROJECT_FILE", &project)
        .args(["repl", "--dry-run", "--no-file-arg", "--poetry"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let request = dry_run_request(&output.stdout);
    assert_eq!(
        request["cmd"],
        json!(["global-poetry", "run", "project-python", "-i"])
    );
}

#[test]
fn test_set_overrides_project_settings() {
    let temp_dir = TempDir::new().unwrap();
    let project = write_project_file(
        temp_dir.path(),
        &[],
        json!({ "replbuild.pythonPath": "project-python" }),
    );

    let output = replbuild_cmd()
        .arg("--project-file")
        .arg(&project)
        .args(["--set", "replbuild.pythonPath=python3.13"])
        .args(["repl", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let request = dry_run_request(&output.stdout);
    assert_eq!(request["cmd"], json!(["python3.13", "-i"]));
    assert_eq!(request["cwd"], json!("."));
}

#[test]
fn test_custom_command_substitutes_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "a.py", "");

    let output = replbuild_cmd()
        .args(["--set", "replbuild.pythonPath=pypy3"])
        .args(["repl", "--dry-run"])
        .arg(&file)
        .args(["--", "$replbuild.pythonPath", "-X", "dev", "-i"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let request = dry_run_request(&output.stdout);
    assert_eq!(
        request["cmd"],
        json!(["pypy3", "-X", "dev", "-i", file.display().to_string()])
    );
}

#[test]
fn test_unknown_placeholder_is_configuration_error() {
    replbuild_cmd()
        .args(["repl", "--dry-run", "--", "$replbuild.interpreter", "-i"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown placeholder '$replbuild.interpreter'"));
}

#[test]
fn test_non_textual_setting_is_configuration_error() {
    replbuild_cmd()
        .args(["--set", "replbuild.pythonPath=[\"python\"]", "repl", "--dry-run"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("must be a string"));
}

#[test]
fn test_numeric_set_value_is_used_as_text() {
    let output = replbuild_cmd()
        .args(["--set", "replbuild.pythonPath=3.11", "repl", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let request = dry_run_request(&output.stdout);
    assert_eq!(request["cmd"], json!(["3.11", "-i"]));
}

#[test]
fn test_malformed_global_settings_is_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let global = write_file(temp_dir.path(), "global.json", "{ not json");

    replbuild_cmd()
        .env("REPLBUILD_SETTINGS_PATH", &global)
        .args(["repl", "--dry-run"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse settings file"));
}

#[test]
fn test_pytest_flag_without_pytest_is_usage_error() {
    replbuild_cmd()
        .args(["repl", "a.py", "--collect-only"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_interpreter_is_launch_failure() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "a.py", "");

    replbuild_cmd()
        .args(["--set", "replbuild.pythonPath=replbuild-no-such-python"])
        .arg("repl")
        .arg(&file)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to start 'replbuild-no-such-python'"));
}

#[cfg(unix)]
#[test]
fn test_child_exit_code_is_passed_through() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), ".env", "GREETING=hello\n");
    let file = write_file(temp_dir.path(), "a.py", "");

    replbuild_cmd()
        .arg("--project-folder")
        .arg(temp_dir.path())
        .args(["repl", "--no-file-arg"])
        .arg(&file)
        .args(["--", "sh", "-c", "test \"$GREETING\" = hello && exit 7"])
        .assert()
        .code(7);
}

#[cfg(unix)]
#[test]
fn test_child_runs_in_open_file_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "pkg/a.py", "");
    let pkg = std::fs::canonicalize(temp_dir.path().join("pkg")).unwrap();

    replbuild_cmd()
        .args(["repl", "--no-file-arg"])
        .arg(&file)
        .args(["--", "pwd", "-P"])
        .assert()
        .success()
        .stdout(predicate::str::contains(pkg.display().to_string()));
}

#[cfg(unix)]
#[test]
fn test_child_sees_settings_env_over_env_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "app/.env", "FOO=from-file\nKEPT=file-only\n");
    let file = write_file(root, "app/a.py", "");
    let project = write_project_file(
        root,
        &["app"],
        json!({ "env": { "FOO": "from-settings", "DEBUG": 1 } }),
    );

    replbuild_cmd()
        .arg("--project-file")
        .arg(&project)
        .args(["repl", "--no-file-arg"])
        .arg(&file)
        .args(["--", "sh", "-c", "echo \"$FOO $KEPT $DEBUG\""])
        .assert()
        .success()
        .stdout("from-settings file-only 1\n");
}

#[cfg(unix)]
#[test]
fn test_set_env_overrides_project_env_in_child() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), ".env", "FOO=from-file\n");
    let file = write_file(temp_dir.path(), "a.py", "");

    replbuild_cmd()
        .arg("--project-folder")
        .arg(temp_dir.path())
        .args(["--set", "env={\"FOO\":\"from-set\"}"])
        .args(["repl", "--no-file-arg"])
        .arg(&file)
        .args(["--", "sh", "-c", "echo \"$FOO\""])
        .assert()
        .success()
        .stdout("from-set\n");
}
