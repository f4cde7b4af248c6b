//! Black-box tests of the `labractl` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn labractl(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("labractl").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("LABRA_DEBUG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_the_commands() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn version_prints_the_crate_version() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_is_printed_even_when_quiet() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir)
        .args(["--quiet", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_color_accepts_any_conventional_value() {
    let dir = tempfile::tempdir().unwrap();
    for value in ["1", "", "0", "yes", "true"] {
        labractl(&dir)
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success();
    }
}

#[test]
fn invalid_project_name_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir)
        .args(["create", "9lives"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!dir.path().join("9lives").exists());
}

#[test]
fn name_with_path_separator_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir)
        .args(["create", "../escape"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn missing_project_name_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir).arg("create").assert().code(2);
}

#[test]
fn unknown_package_manager_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir)
        .args(["start", "--package-manager", "pnpm"])
        .assert()
        .code(2);
}

#[test]
fn missing_explicit_config_file_exits_with_four() {
    let dir = tempfile::tempdir().unwrap();
    labractl(&dir)
        .args(["--config", "does-not-exist.toml", "version"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn malformed_manifest_stops_start() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), "not json").unwrap();

    labractl(&dir)
        .arg("start")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Manifest parse failed"));
}
