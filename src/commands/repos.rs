// SPDX-License-Identifier: MIT OR Apache-2.0

//! List local checkouts under the configured roots

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use hound_open::config::Config;
use hound_open::output::print_json;
use hound_open::prompt::TerminalPrompter;
use hound_open::repos::{LocalRepo, RepoIndex};

#[derive(Debug, Serialize)]
struct ReposPayload<'a> {
    roots: Vec<String>,
    repos: Vec<&'a LocalRepo>,
    failures: Vec<String>,
}

/// Run the repos command
pub fn run(mut config: Config, format: OutputFormat, compact: bool) -> Result<()> {
    let roots = config.require_local_roots(&TerminalPrompter::new())?;
    let report = RepoIndex::scan(roots.as_slice());

    let mut repos: Vec<&LocalRepo> = report.index.iter().collect();
    repos.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

    match format {
        OutputFormat::Json => {
            let payload = ReposPayload {
                roots: roots.iter().map(|r| r.display().to_string()).collect(),
                repos,
                failures: report.failures.iter().map(|e| e.to_string()).collect(),
            };
            print_json(&payload, compact)?;
        }
        OutputFormat::Text => {
            for failure in &report.failures {
                eprintln!("{} {}", "!".yellow(), failure);
            }
            if repos.is_empty() {
                println!("{} No repositories found", "✗".red());
                return Ok(());
            }
            for repo in &repos {
                println!(
                    "{}  {}  {}",
                    repo.name.cyan().bold(),
                    repo.path.display(),
                    repo.remote_url.dimmed()
                );
            }
            println!("\n{} {} repositories", "✓".green(), repos.len());
        }
    }
    Ok(())
}
