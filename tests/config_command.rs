// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

#[test]
fn config_json_shows_source_and_values() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("hound.toml");
    fs::write(
        &path,
        r#"
url = "http://hound.local"
repoPattern = "git@host:${namespace}/${repo}.git"

[[launchers]]
name = "code"
launch = "code -g ${folder}/${fileName}:${lineNumber}"
"#,
    )
    .expect("write config");

    let output = Command::new(assert_cmd::cargo::cargo_bin!("hound-open"))
        .env("HOUND_OPEN_CONFIG", &path)
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(payload["path"], path.display().to_string());
    assert_eq!(payload["config"]["url"], "http://hound.local");
    assert_eq!(
        payload["config"]["repo_pattern"],
        "git@host:${namespace}/${repo}.git"
    );
    assert_eq!(payload["config"]["launchers"][0]["name"], "code");
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("hound.toml");
    fs::write(&path, "launchers = 3\n").expect("write config");

    Command::new(assert_cmd::cargo::cargo_bin!("hound-open"))
        .env("HOUND_OPEN_CONFIG", &path)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn completions_do_not_need_config() {
    Command::new(assert_cmd::cargo::cargo_bin!("hound-open"))
        .env("HOUND_OPEN_CONFIG", "/nonexistent/dir/hound.toml")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hound-open"));
}
