// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn make_checkout(root: &Path, name: &str, url: &str) {
    let git = root.join(name).join(".git");
    fs::create_dir_all(&git).expect("create .git");
    fs::write(
        git.join("config"),
        format!("[core]\n\tbare = false\n[remote \"origin\"]\n\turl = {url}\n"),
    )
    .expect("write git config");
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, body).expect("write config");
    path
}

#[test]
fn repos_lists_checkouts_from_every_root_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let work = dir.path().join("work");
    let src = dir.path().join("src");
    make_checkout(&work, "app", "https://example.com/org/app.git");
    make_checkout(&src, "app", "git@example.com:fork/app.git");
    make_checkout(&src, "lib", "git@example.com:org/lib.git");
    fs::create_dir_all(src.join("not-a-repo")).expect("mkdir");

    let config = write_config(
        dir.path(),
        &format!(
            "local_repo_roots = [{:?}, {:?}, {:?}]\n",
            work.display().to_string(),
            src.display().to_string(),
            dir.path().join("missing").display().to_string()
        ),
    );

    let output = Command::new(assert_cmd::cargo::cargo_bin!("hound-open"))
        .env("HOUND_OPEN_CONFIG", &config)
        .args(["--format", "json", "--compact", "repos"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&output).expect("json");
    let repos = payload["repos"].as_array().expect("repos array");
    let names: Vec<&str> = repos.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["app", "app", "lib"]);
    assert!(repos
        .iter()
        .any(|r| r["remote_url"] == "https://example.com/org/app.git"));
    assert_eq!(payload["failures"].as_array().map(Vec::len), Some(1));
}

#[test]
fn repos_text_output_reports_count() {
    let dir = TempDir::new().expect("tempdir");
    let work = dir.path().join("work");
    make_checkout(&work, "widgets", "https://example.com/org/widgets.git");
    let config = write_config(
        dir.path(),
        &format!("localRepoRoots = [{:?}]\n", work.display().to_string()),
    );

    Command::new(assert_cmd::cargo::cargo_bin!("hound-open"))
        .env("HOUND_OPEN_CONFIG", &config)
        .env("NO_COLOR", "1")
        .arg("repos")
        .assert()
        .success()
        .stdout(predicate::str::contains("widgets"))
        .stdout(predicate::str::contains("1 repositories"));
}
