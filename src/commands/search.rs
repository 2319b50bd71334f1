// SPDX-License-Identifier: MIT OR Apache-2.0

//! Print search results grouped by repository

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use hound_open::config::Config;
use hound_open::hit::SearchHit;
use hound_open::output::print_json;
use hound_open::prompt::TerminalPrompter;

#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    query: &'a str,
    total: usize,
    hits: &'a [SearchHit],
}

/// Run the search command
pub fn run(
    mut config: Config,
    query: &str,
    ignore_case: bool,
    format: OutputFormat,
    compact: bool,
) -> Result<()> {
    let url = config.require_url(&TerminalPrompter::new())?;
    let hits = super::fetch_hits(&url, query, ignore_case)?;

    match format {
        OutputFormat::Json => {
            let payload = SearchPayload {
                query,
                total: hits.len(),
                hits: &hits,
            };
            print_json(&payload, compact)?;
        }
        OutputFormat::Text => print_text(query, &hits),
    }
    Ok(())
}

fn print_text(query: &str, hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("{} No results found for: {}", "✗".red(), query.yellow());
        return;
    }

    let mut current_repo: Option<String> = None;
    for hit in hits {
        let repo = hit.qualified_repo();
        if current_repo.as_deref() != Some(repo.as_str()) {
            println!("\n{}", repo.cyan().bold());
            current_repo = Some(repo);
        }
        println!(
            "  {}:{}  {}",
            hit.file_name_short.green(),
            hit.line_number.to_string().yellow(),
            hit.line.trim()
        );
    }
    println!("\n{} {} matches", "✓".green(), hits.len());
}
