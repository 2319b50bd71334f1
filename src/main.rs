// SPDX-License-Identifier: MIT OR Apache-2.0

//! hound-open - Search a Hound server and open matches locally
//!
//! Resolves each selected match to a git checkout under the configured
//! roots, cloning it on demand, and opens the file with a launcher.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, OutputFormat};
use hound_open::config::{Config, ConfigOutputFormat};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HOUND_OPEN_LOG";

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let compact = cli.compact;

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "hound-open", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let format = cli.format.unwrap_or(match config.output_format() {
        Some(ConfigOutputFormat::Json) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    match cli.command {
        Commands::Search { query, ignore_case } => {
            commands::search::run(config, &query, ignore_case, format, compact)?;
        }
        Commands::Open { query, ignore_case } => {
            commands::open::run(config, &query, ignore_case)?;
        }
        Commands::Repos => {
            commands::repos::run(config, format, compact)?;
        }
        Commands::Config => {
            commands::config::run(&config, format, compact)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
