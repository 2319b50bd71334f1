// SPDX-License-Identifier: MIT OR Apache-2.0

//! hound-open - Hound search results opened in local checkouts
//!
//! Shared modules for the hound-open CLI tool.

pub mod api;
pub mod config;
pub mod errors;
pub mod hit;
pub mod launcher;
pub mod output;
pub mod preview;
pub mod process;
pub mod prompt;
pub mod repos;
pub mod resolve;
