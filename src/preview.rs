// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text rendering of a hit with its surrounding lines.

use crate::hit::SearchHit;

const MATCH_MARKER: &str = ">>";

/// Title line: `namespace / repo - file`, namespace omitted when empty.
pub fn preview_title(hit: &SearchHit) -> String {
    let repo = if hit.repo_namespace.is_empty() {
        hit.repo_name.clone()
    } else {
        format!("{} / {}", hit.repo_namespace, hit.repo_name)
    };
    format!("{} - {}", repo, hit.file_name)
}

pub fn render_preview(hit: &SearchHit) -> String {
    let title = preview_title(hit);
    let underline = "-".repeat(title.chars().count());
    [
        title.as_str(),
        underline.as_str(),
        hit.before.as_str(),
        MATCH_MARKER,
        hit.line.as_str(),
        MATCH_MARKER,
        hit.after.as_str(),
    ]
    .join("\n")
}

/// One-line label used in hit pickers.
pub fn hit_label(hit: &SearchHit) -> String {
    format!(
        "{} - {}:{}  {}",
        hit.repo_name,
        hit.file_name_short,
        hit.line_number,
        hit.line.trim()
    )
}
