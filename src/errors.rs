// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Provides user-friendly error messages with actionable suggestions.
//! User cancellation is never an error: interactive operations return
//! `Ok(None)` instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HoundError {
    /// A required setting was absent and the user declined to supply it
    #[error(
        "Missing configuration value '{key}'\n\n\
         Suggestion: add it to your config file or answer the prompt.\n\
         Example: hound-open config"
    )]
    ConfigMissing { key: String },

    /// The configuration file could not be parsed or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The search API returned a non-2xx status or could not be reached
    #[error(
        "Search request to '{url}' failed: {reason}\n\n\
         Suggestion: check the 'url' setting and that the Hound server is reachable."
    )]
    FetchFailure { url: String, reason: String },

    /// A local root could not be listed
    #[error("Cannot scan repository root '{}': {source}", .root.display())]
    ScanFailure {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external clone process reported an error
    #[error("Failed to clone '{address}': {reason}")]
    CloneFailure { address: String, reason: String },

    /// No configured launcher applies to the resolved checkout
    #[error(
        "No launcher applies to '{file}' in '{}'\n\n\
         Suggestion: add a launcher with no matchers as a fallback, e.g.\n\
         [[launchers]]\n\
         name = \"editor\"\n\
         launch = \"code --goto ${{folder}}/${{fileName}}:${{lineNumber}}\"",
        .folder.display()
    )]
    NoApplicableLauncher { folder: PathBuf, file: String },
}

impl HoundError {
    pub fn config_missing(key: impl Into<String>) -> Self {
        Self::ConfigMissing { key: key.into() }
    }
}
