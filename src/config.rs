// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for hound-open
//!
//! Loads configuration from `$HOUND_OPEN_CONFIG`, `.houndrc.toml` in the
//! current directory, or `~/.config/hound-open/config.toml`. Required values
//! that are missing are prompted for and written back to the same file.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

use crate::errors::HoundError;
use crate::launcher::LauncherConfig;
use crate::prompt::Prompter;

pub const CONFIG_ENV: &str = "HOUND_OPEN_CONFIG";
pub const PROJECT_CONFIG_FILE: &str = ".houndrc.toml";

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from one of the config files
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Hound server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Directories whose immediate subdirectories are checkouts
    #[serde(alias = "localRepoRoots", skip_serializing_if = "Vec::is_empty")]
    pub local_repo_roots: Vec<String>,
    /// Clone address template with `${namespace}` and `${repo}`
    #[serde(alias = "repoPattern", skip_serializing_if = "Option::is_none")]
    pub repo_pattern: Option<String>,
    /// Default output format (text or json)
    #[serde(alias = "defaultFormat", skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub launchers: Vec<LauncherConfig>,

    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. `$HOUND_OPEN_CONFIG` (used even if the file does not exist yet)
    /// 2. `.houndrc.toml` in current directory
    /// 3. `~/.config/hound-open/config.toml`
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let cwd = std::env::current_dir().context("Cannot determine current directory")?;
        Self::discover(explicit, &cwd, user_config_path())
    }

    fn discover(explicit: Option<PathBuf>, cwd: &Path, user: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_or_default(path);
        }

        let project = cwd.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Self::load_from_path(&project);
        }

        match user {
            Some(path) => Self::load_or_default(path),
            None => Ok(Self::default()),
        }
    }

    fn load_or_default(path: PathBuf) -> Result<Self> {
        if path.is_file() {
            Self::load_from_path(&path)
        } else {
            Ok(Self {
                source: Some(path),
                ..Self::default()
            })
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            HoundError::InvalidConfig(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.source = Some(path.to_path_buf());
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// File the config was read from, or will be written to.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn save_path(&self) -> Result<PathBuf> {
        match &self.source {
            Some(path) => Ok(path.clone()),
            None => user_config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory")),
        }
    }

    /// Write one setting back to the source file, creating it if needed.
    ///
    /// Only `key` is touched: comments, unknown keys and camelCase spellings
    /// already in the file are kept as written.
    pub fn save_key(&self, key: &str) -> Result<PathBuf> {
        let path = self.save_path()?;
        let mut document = if path.is_file() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            content.parse::<DocumentMut>().map_err(|e| {
                HoundError::InvalidConfig(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            DocumentMut::new()
        };

        let rendered = toml::to_string(self).context("Failed to serialize config")?;
        let fresh = rendered
            .parse::<DocumentMut>()
            .context("Failed to re-read serialized config")?;
        let Some(item) = fresh.get(key) else {
            return Ok(path);
        };
        let alias = camel_case(key);
        let existing = if document.contains_key(&alias) {
            alias.as_str()
        } else {
            key
        };
        document[existing] = item.clone();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, document.to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(key, "saved config to {}", path.display());
        Ok(path)
    }

    /// Reject launcher definitions that can never work.
    pub fn validate(&self) -> Result<()> {
        for launcher in &self.launchers {
            if launcher.launch.trim().is_empty() {
                return Err(HoundError::InvalidConfig(format!(
                    "launcher '{}' has an empty launch command",
                    launcher.name
                ))
                .into());
            }
            for matcher in &launcher.matchers {
                if let Some(pattern) = &matcher.name_matches_regex {
                    Regex::new(pattern).map_err(|e| {
                        HoundError::InvalidConfig(format!(
                            "launcher '{}' has an invalid nameMatchesRegex: {}",
                            launcher.name, e
                        ))
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format
            .as_ref()
            .and_then(|s| match s.to_lowercase().as_str() {
                "json" => Some(ConfigOutputFormat::Json),
                "text" => Some(ConfigOutputFormat::Text),
                _ => None,
            })
    }

    /// Configured roots with `~` expanded and relative entries made absolute.
    pub fn local_roots(&self) -> Vec<PathBuf> {
        self.local_repo_roots
            .iter()
            .map(|r| {
                let root = expand_home(r);
                std::path::absolute(&root).unwrap_or(root)
            })
            .collect()
    }

    pub fn require_url(&mut self, prompter: &dyn Prompter) -> Result<String> {
        if let Some(url) = self.url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.clone());
        }
        let url = ask(prompter, "url", "Hound server URL (e.g. http://hound.example.com)")?;
        self.url = Some(url.clone());
        self.save_key("url")?;
        Ok(url)
    }

    pub fn require_local_roots(&mut self, prompter: &dyn Prompter) -> Result<Vec<PathBuf>> {
        if self.local_repo_roots.is_empty() {
            let raw = ask(
                prompter,
                "local_repo_roots",
                "Directories containing your checkouts (comma separated)",
            )?;
            self.local_repo_roots = split_list(&raw);
            if self.local_repo_roots.is_empty() {
                return Err(HoundError::config_missing("local_repo_roots").into());
            }
            self.save_key("local_repo_roots")?;
        }
        Ok(self.local_roots())
    }

    pub fn require_repo_pattern(&mut self, prompter: &dyn Prompter) -> Result<String> {
        if let Some(pattern) = self.repo_pattern.as_ref().filter(|p| !p.trim().is_empty()) {
            return Ok(pattern.clone());
        }
        let pattern = ask(
            prompter,
            "repo_pattern",
            "Clone address pattern (e.g. git@git.example.com:${namespace}/${repo}.git)",
        )?;
        self.repo_pattern = Some(pattern.clone());
        self.save_key("repo_pattern")?;
        Ok(pattern)
    }

    /// Clone pattern for one resolution.
    ///
    /// Asked for only when `clone_needed`; otherwise the configured value (or
    /// an empty pattern) is returned without prompting.
    pub fn repo_pattern_for(
        &mut self,
        clone_needed: bool,
        prompter: &dyn Prompter,
    ) -> Result<String> {
        if clone_needed {
            self.require_repo_pattern(prompter)
        } else {
            Ok(self.repo_pattern.clone().unwrap_or_default())
        }
    }

    /// Configured launchers; when none exist, prompt for one catch-all command.
    pub fn require_launchers(&mut self, prompter: &dyn Prompter) -> Result<Vec<LauncherConfig>> {
        if self.launchers.is_empty() {
            let launch = ask(
                prompter,
                "launchers",
                "Launch command (e.g. code --goto ${folder}/${fileName}:${lineNumber})",
            )?;
            self.launchers.push(LauncherConfig {
                name: "default".into(),
                launch,
                matchers: Vec::new(),
            });
            self.save_key("launchers")?;
        }
        Ok(self.launchers.clone())
    }
}

fn ask(prompter: &dyn Prompter, key: &str, prompt: &str) -> Result<String> {
    prompter
        .input(prompt)?
        .ok_or_else(|| HoundError::config_missing(key).into())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `local_repo_roots` -> `localRepoRoots`
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("hound-open").join("config.toml"))
}
