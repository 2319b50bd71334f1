// SPDX-License-Identifier: MIT OR Apache-2.0

//! Launcher selection and dispatch
//!
//! A launcher is a command template for opening a file at a line. Its
//! matchers decide whether it applies to a resolved checkout.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::HoundError;
use crate::hit::SearchHit;
use crate::process::ProcessRunner;
use crate::prompt::Prompter;
use crate::resolve::Resolution;

pub const PLACEHOLDER_FOLDER: &str = "${folder}";
pub const PLACEHOLDER_FILE_NAME: &str = "${fileName}";
pub const PLACEHOLDER_LINE_NUMBER: &str = "${lineNumber}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    pub name: String,
    /// Command template with `${folder}`, `${fileName}` and `${lineNumber}`
    pub launch: String,
    #[serde(default)]
    pub matchers: Vec<MatcherSpec>,
}

/// Predicates of one matcher; unset kinds are not evaluated and unknown keys
/// are ignored when loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherSpec {
    #[serde(
        default,
        alias = "containsFile",
        skip_serializing_if = "Option::is_none"
    )]
    pub contains_file: Option<String>,
    #[serde(
        default,
        alias = "nameMatchesRegex",
        skip_serializing_if = "Option::is_none"
    )]
    pub name_matches_regex: Option<String>,
    #[serde(
        default,
        alias = "hasExtension",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_extension: Option<String>,
}

impl MatcherSpec {
    fn has_predicates(&self) -> bool {
        self.contains_file.is_some()
            || self.name_matches_regex.is_some()
            || self.has_extension.is_some()
    }

    /// True when any of the set predicates holds.
    fn holds(&self, candidate: &Path, hit: &SearchHit) -> bool {
        if !self.has_predicates() {
            return true;
        }
        if let Some(file) = &self.contains_file {
            if candidate.join(file).exists() {
                return true;
            }
        }
        if let Some(pattern) = &self.name_matches_regex {
            match Regex::new(pattern) {
                Ok(re) if re.is_match(&hit.repo_name) => return true,
                Ok(_) => {}
                Err(err) => tracing::warn!("ignoring invalid nameMatchesRegex '{pattern}': {err}"),
            }
        }
        if let Some(ext) = &self.has_extension {
            if hit.file_name.ends_with(&format!(".{ext}")) {
                return true;
            }
        }
        false
    }
}

/// Decide whether `launcher` applies to `candidate` for this hit.
///
/// Matchers are OR-ed: one holding matcher is enough, which is looser than
/// one might expect. A launcher without matchers always applies.
pub fn launcher_matches(candidate: &Path, hit: &SearchHit, launcher: &LauncherConfig) -> bool {
    launcher.matchers.is_empty()
        || launcher
            .matchers
            .iter()
            .any(|matcher| matcher.holds(candidate, hit))
}

/// Substitute every placeholder occurrence in `template`.
pub fn render_launch_command(
    template: &str,
    folder: &Path,
    file_name: &str,
    line_number: u32,
) -> String {
    template
        .replace(PLACEHOLDER_FOLDER, &folder.to_string_lossy())
        .replace(PLACEHOLDER_FILE_NAME, file_name)
        .replace(PLACEHOLDER_LINE_NUMBER, &line_number.to_string())
}

/// Pick an applicable launcher and start it detached.
///
/// Returns the command that was started, or `None` if the user cancelled the
/// launcher choice.
pub fn dispatch(
    resolution: &Resolution,
    launchers: &[LauncherConfig],
    prompter: &dyn Prompter,
    runner: &dyn ProcessRunner,
) -> Result<Option<String>> {
    let folder = resolution.path.as_path();
    let hit = &resolution.hit;

    let applicable: Vec<&LauncherConfig> = launchers
        .iter()
        .filter(|launcher| launcher_matches(folder, hit, launcher))
        .collect();
    tracing::debug!(
        applicable = applicable.len(),
        total = launchers.len(),
        folder = %folder.display(),
        "filtered launchers"
    );

    let launcher = match applicable.as_slice() {
        [] => {
            return Err(HoundError::NoApplicableLauncher {
                folder: folder.to_path_buf(),
                file: hit.file_name.clone(),
            }
            .into())
        }
        [only] => *only,
        many => {
            let names: Vec<String> = many.iter().map(|l| l.name.clone()).collect();
            match prompter.choose_one("Open with", &names)? {
                Some(idx) if idx < many.len() => many[idx],
                _ => return Ok(None),
            }
        }
    };

    let command = render_launch_command(&launcher.launch, folder, &hit.file_name, hit.line_number);
    runner.detach(&command, folder)?;
    Ok(Some(command))
}
