// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive flow: search, pick a hit, resolve it locally, launch.

use anyhow::Result;
use colored::Colorize;

use hound_open::config::Config;
use hound_open::launcher::dispatch;
use hound_open::preview::{hit_label, render_preview};
use hound_open::process::SystemRunner;
use hound_open::prompt::{Prompter, TerminalPrompter};
use hound_open::repos::RepoIndex;
use hound_open::resolve::{resolve, CloneTarget};

/// Run the open command
pub fn run(mut config: Config, query: &str, ignore_case: bool) -> Result<()> {
    config.validate()?;
    let prompter = TerminalPrompter::new();
    let runner = SystemRunner;

    let url = config.require_url(&prompter)?;
    let hits = super::fetch_hits(&url, query, ignore_case)?;
    if hits.is_empty() {
        println!("{} No results found for: {}", "✗".red(), query.yellow());
        return Ok(());
    }

    let labels: Vec<String> = hits.iter().map(hit_label).collect();
    let Some(selected) = prompter.choose_one("Select a result", &labels)? else {
        return Ok(());
    };
    let Some(hit) = hits.get(selected) else {
        return Ok(());
    };
    eprintln!("{}\n", render_preview(hit).dimmed());

    let roots = config.require_local_roots(&prompter)?;
    let mut index = RepoIndex::scan(roots.as_slice()).index;

    let clone_needed = index.find_by_name(&hit.repo_name).is_empty();
    let pattern = config.repo_pattern_for(clone_needed, &prompter)?;

    let target = CloneTarget {
        roots: &roots,
        pattern: &pattern,
    };
    let Some(resolution) = resolve(hit, &mut index, target, &runner, &prompter)? else {
        return Ok(());
    };

    let launchers = config.require_launchers(&prompter)?;
    if let Some(command) = dispatch(&resolution, &launchers, &prompter, &runner)? {
        println!(
            "{} Opened {}:{} in {}",
            "✓".green(),
            resolution.hit.file_name,
            resolution.hit.line_number,
            resolution.path.display()
        );
        tracing::debug!(%command, "launcher started");
    }
    Ok(())
}
