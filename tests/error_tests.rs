//! Error scenario integration tests

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn bettrwrite(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bettrwrite").unwrap();
    cmd.arg("--config")
        .arg(config)
        .args(["--no-log-file", "--no-notify"])
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("OLLAMA_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn listen_without_shortcuts_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    bettrwrite(&path)
        .arg("listen")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No usable shortcuts"))
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn listen_with_only_invalid_shortcuts_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[[shortcuts]]\nid = \"local\"\nkeys = \"ctrl+l\"\nbackend = \"ollama\"\nprompt = \"x\"\n",
    )
    .unwrap();

    bettrwrite(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Skipped"))
        .stderr(predicate::str::contains("No usable shortcuts"));
}

#[test]
fn run_unknown_shortcut_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[[shortcuts]]\nid = \"grammar_correct\"\nkeys = \"ctrl+e\"\nprompt = \"Fix.\"\n",
    )
    .unwrap();

    bettrwrite(&path)
        .args(["run", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'nope' not configured"))
        .stderr(predicate::str::contains("grammar_correct"));
}

#[test]
fn run_requires_shortcut_id() {
    let dir = tempfile::tempdir().unwrap();

    bettrwrite(&dir.path().join("config.toml"))
        .arg("run")
        .assert()
        .code(2);
}

#[test]
fn malformed_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[[shortcuts]\nid = ").unwrap();

    bettrwrite(&path)
        .arg("shortcuts")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "# mine\n").unwrap();

    bettrwrite(&path)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");
}

#[test]
fn unknown_subcommand_is_usage_error() {
    Command::cargo_bin("bettrwrite")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .code(2);
}
