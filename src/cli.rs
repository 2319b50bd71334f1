// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// hound-open - Search Hound and open matches in local checkouts
///
/// Finds code on a Hound server, maps the matching repository to a local
/// checkout (cloning it when missing) and opens the file at the matched line
/// with a configured launcher.
#[derive(Parser, Debug)]
#[command(name = "hound-open")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Quickstart:\n  hound-open open \"func NewClient\"\n  hound-open search -i todo\n  hound-open repos --format json"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the Hound server and print matches
    #[command(visible_alias = "s")]
    Search {
        /// Search query (Hound regex syntax)
        query: String,

        /// Case-insensitive search
        #[arg(short, long)]
        ignore_case: bool,
    },

    /// Search, pick a match, and open it in a local checkout
    #[command(visible_alias = "o")]
    Open {
        /// Search query (Hound regex syntax)
        query: String,

        /// Case-insensitive search
        #[arg(short, long)]
        ignore_case: bool,
    },

    /// List git checkouts found under the configured local roots
    #[command(visible_alias = "r")]
    Repos,

    /// Print the effective configuration and where it lives
    Config,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
