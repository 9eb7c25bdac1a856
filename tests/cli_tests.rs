//! CLI integration tests

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE_CONFIG: &str = r#"
[settings]
openai_api_key = "sk-abcdefghijklmnop"
quit_keys = "ctrl+alt+q"

[[shortcuts]]
id = "grammar_correct"
keys = "ctrl+e"
backend = "openai"
model = "gpt-4o"
prompt = "Fix grammar."

[[shortcuts]]
id = "summarize"
keys = "ctrl+shift+s"
backend = "ollama"
model = "llama3"
prompt = "Summarize."
"#;

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

fn config_with(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn help_output() {
    Command::cargo_bin("bettrwrite")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("listen"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("shortcuts"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--keystroke-tool"))
        .stdout(predicate::str::contains("--no-notify"));
}

#[test]
fn version_output() {
    Command::cargo_bin("bettrwrite")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bettrwrite"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_prints_given_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");

    bettrwrite(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_init_writes_default_shortcut() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    bettrwrite(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config file created"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("grammar_correct"));
    assert!(written.contains("ctrl+e"));
    assert!(written.contains("YOUR_OPENAI_API_KEY_OR_NULL"));
}

#[test]
fn config_show_masks_api_key() {
    let (_dir, path) = config_with(SAMPLE_CONFIG);

    bettrwrite(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-a...mnop"))
        .stdout(predicate::str::contains("sk-abcdefghijklmnop").not())
        .stdout(predicate::str::contains("ctrl+alt+q"))
        .stdout(predicate::str::contains("summarize"));
}

#[test]
fn config_show_placeholder_key_is_not_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    bettrwrite(&path).args(["config", "init"]).assert().success();

    bettrwrite(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"))
        .stdout(predicate::str::contains("YOUR_OPENAI_API_KEY_OR_NULL").not());
}

#[test]
fn shortcuts_lists_usable_and_reports_skipped() {
    let content = format!(
        "{}\n[[shortcuts]]\nid = \"broken\"\nkeys = \"ctrl+b\"\nbackend = \"gemini\"\nprompt = \"x\"\n",
        SAMPLE_CONFIG
    );
    let (_dir, path) = config_with(&content);

    bettrwrite(&path)
        .arg("shortcuts")
        .assert()
        .success()
        .stdout(predicate::str::contains("grammar_correct"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("llama3"))
        .stderr(predicate::str::contains("Skipped"))
        .stderr(predicate::str::contains("gemini"));
}

#[test]
fn json_config_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "settings": {"openai_api_key": "YOUR_OPENAI_API_KEY_OR_NULL"},
            "shortcuts": [{
                "id": "grammar_correct",
                "keys": "ctrl+e",
                "backend": "openai",
                "model": "gpt-4o",
                "prompt": "Fix.",
                "openai_options": {"temperature": 0.3}
            }]
        }"#,
    )
    .unwrap();

    bettrwrite(&path)
        .arg("shortcuts")
        .assert()
        .success()
        .stdout(predicate::str::contains("grammar_correct"));
}
