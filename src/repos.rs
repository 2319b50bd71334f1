// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local repository discovery
//!
//! Scans configured root directories for git working copies sitting directly
//! under them and records each checkout's `origin` remote URL.

use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::HoundError;

static ORIGIN_SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[remote\s+"origin"\]([^\[]*)"#).expect("valid origin regex"));
static URL_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*url\s*=\s*(\S.*?)\s*$").expect("valid url regex"));

/// A git checkout found under a local root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalRepo {
    /// Directory name; not unique across roots
    pub name: String,
    pub remote_url: String,
    pub path: PathBuf,
}

/// Point-in-time view of the local checkouts, owned by one session.
#[derive(Debug, Clone, Default)]
pub struct RepoIndex {
    repos: Vec<LocalRepo>,
}

/// Outcome of a scan: whatever could be indexed plus the roots that failed.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub index: RepoIndex,
    pub failures: Vec<HoundError>,
}

impl RepoIndex {
    pub fn new(repos: Vec<LocalRepo>) -> Self {
        Self { repos }
    }

    /// Scan every root concurrently.
    ///
    /// A root that cannot be listed is reported and skipped; sibling roots
    /// are still indexed.
    pub fn scan<P: AsRef<Path> + Sync>(roots: &[P]) -> ScanReport {
        let outcomes: Vec<Result<Vec<LocalRepo>, HoundError>> = roots
            .par_iter()
            .map(|root| scan_root(root.as_ref()))
            .collect();

        let mut report = ScanReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(repos) => report.index.repos.extend(repos),
                Err(err) => {
                    tracing::warn!("{err}");
                    report.failures.push(err);
                }
            }
        }
        tracing::debug!(
            repos = report.index.len(),
            failed_roots = report.failures.len(),
            "scanned local roots"
        );
        report
    }

    pub fn find_by_name(&self, name: &str) -> Vec<&LocalRepo> {
        self.repos.iter().filter(|repo| repo.name == name).collect()
    }

    /// Append a checkout created during this session.
    pub fn push(&mut self, repo: LocalRepo) {
        self.repos.push(repo);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalRepo> {
        self.repos.iter()
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

/// Index the immediate subdirectories of one root.
///
/// Relative roots are resolved against the current directory, so every
/// `LocalRepo::path` is absolute.
pub fn scan_root(root: &Path) -> Result<Vec<LocalRepo>, HoundError> {
    let scan_failure = |source| HoundError::ScanFailure {
        root: root.to_path_buf(),
        source,
    };
    let absolute_root = std::path::absolute(root).map_err(scan_failure)?;
    let entries = fs::read_dir(&absolute_root).map_err(scan_failure)?;

    let mut repos = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let config_path = git_config_path(&path);
        if !config_path.is_file() {
            continue;
        }
        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::debug!("skipping {}: {err}", config_path.display());
                continue;
            }
        };
        let Some(remote_url) = origin_url(&contents) else {
            tracing::debug!("no origin remote in {}", config_path.display());
            continue;
        };
        repos.push(LocalRepo {
            name: entry.file_name().to_string_lossy().into_owned(),
            remote_url,
            path,
        });
    }
    Ok(repos)
}

/// Extract the `origin` URL from git config text.
///
/// Two-stage text match: isolate the `[remote "origin"]` block, then the
/// first `url = ...` line inside it. Missing pieces yield `None`.
pub fn origin_url(config: &str) -> Option<String> {
    let section = ORIGIN_SECTION_RE.captures(config)?.get(1)?.as_str();
    let url = URL_LINE_RE.captures(section)?.get(1)?.as_str();
    Some(url.to_string())
}

fn git_config_path(repo_dir: &Path) -> PathBuf {
    repo_dir.join(".git").join("config")
}
