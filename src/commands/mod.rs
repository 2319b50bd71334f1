// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations

pub mod config;
pub mod open;
pub mod repos;
pub mod search;

use anyhow::{Context, Result};
use hound_open::api::{HoundClient, SearchOptions};
use hound_open::hit::SearchHit;

/// Run one search request on a short-lived runtime.
pub(crate) fn fetch_hits(base_url: &str, query: &str, ignore_case: bool) -> Result<Vec<SearchHit>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let client = HoundClient::new(base_url)?;
    runtime.block_on(client.search(query, SearchOptions { ignore_case }))
}
