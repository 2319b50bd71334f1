// SPDX-License-Identifier: MIT OR Apache-2.0

//! Show the effective configuration

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use hound_open::config::{user_config_path, Config};
use hound_open::output::print_json;

#[derive(Debug, Serialize)]
struct ConfigPayload<'a> {
    path: Option<String>,
    config: &'a Config,
}

pub fn run(config: &Config, format: OutputFormat, compact: bool) -> Result<()> {
    let path = config
        .source()
        .map(|p| p.to_path_buf())
        .or_else(user_config_path)
        .map(|p| p.display().to_string());

    match format {
        OutputFormat::Json => print_json(&ConfigPayload { path, config }, compact)?,
        OutputFormat::Text => {
            println!("# {}", path.as_deref().unwrap_or("<no config file>"));
            let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
            print!("{rendered}");
        }
    }
    Ok(())
}
