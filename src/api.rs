// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hound search API client.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::errors::HoundError;
use crate::hit::{shorten_file_names, SearchHit};

const SEARCH_PATH: &str = "/api/v1/search";
const RESULT_RANGE: &str = "0:100";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub ignore_case: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Results", default)]
    results: Option<BTreeMap<String, RepoResult>>,
}

#[derive(Debug, Deserialize)]
struct RepoResult {
    #[serde(rename = "Matches", default)]
    matches: Vec<FileMatch>,
}

#[derive(Debug, Deserialize)]
struct FileMatch {
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Matches", default)]
    matches: Vec<LineMatch>,
}

#[derive(Debug, Deserialize)]
struct LineMatch {
    #[serde(rename = "Line", default)]
    line: String,
    #[serde(rename = "LineNumber")]
    line_number: u32,
    #[serde(rename = "Before", default)]
    before: ContextLines,
    #[serde(rename = "After", default)]
    after: ContextLines,
}

/// Hound sends context as an array of lines; older servers send one string.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum ContextLines {
    Lines(Vec<String>),
    Text(String),
    #[default]
    Missing,
}

impl ContextLines {
    fn into_text(self) -> String {
        match self {
            ContextLines::Lines(lines) => lines.join("\n"),
            ContextLines::Text(text) => text,
            ContextLines::Missing => String::new(),
        }
    }
}

pub struct HoundClient {
    base_url: String,
    http: reqwest::Client,
}

impl HoundClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    /// Run a search and return the shortened hits, ordered by repository key.
    pub async fn search(&self, query: &str, options: SearchOptions) -> Result<Vec<SearchHit>> {
        let url = self.search_url();
        let case = if options.ignore_case { "fosho" } else { "nope" };
        tracing::debug!(%url, query, case, "querying hound");

        let fetch_failure = |reason: String| HoundError::FetchFailure {
            url: url.clone(),
            reason,
        };

        let response = self
            .http
            .get(&url)
            .query(&[
                ("rng", RESULT_RANGE),
                ("repos", "*"),
                ("i", case),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| fetch_failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failure(format!("Request failed: {status}")).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_failure(e.to_string()))?;
        let hits = parse_results(&body)?;
        tracing::debug!(count = hits.len(), "parsed hound results");
        Ok(hits)
    }
}

/// Parse a Hound search response body into shortened hits.
pub fn parse_results(body: &str) -> Result<Vec<SearchHit>> {
    let parsed: SearchResponse =
        serde_json::from_str(body).context("Failed to parse search response")?;

    let mut hits = Vec::new();
    for (key, repo) in parsed.results.unwrap_or_default() {
        let (namespace, name) = split_repo_key(&key);
        for file in repo.matches {
            for m in file.matches {
                hits.push(SearchHit {
                    repo_namespace: namespace.to_string(),
                    repo_name: name.to_string(),
                    file_name: file.filename.clone(),
                    file_name_short: file.filename.clone(),
                    line_number: m.line_number,
                    before: m.before.into_text(),
                    line: m.line,
                    after: m.after.into_text(),
                });
            }
        }
    }

    shorten_file_names(&mut hits);
    Ok(hits)
}

/// Split `"namespace/repo"` at the last slash; a bare key has no namespace.
fn split_repo_key(key: &str) -> (&str, &str) {
    match key.rsplit_once('/') {
        Some((namespace, name)) => (namespace.trim(), name.trim()),
        None => ("", key.trim()),
    }
}
