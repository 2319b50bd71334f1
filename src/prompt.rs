// SPDX-License-Identifier: MIT OR Apache-2.0

//! User interaction seam.
//!
//! Every method blocks until the user answers. `None`/`false` mean the user
//! cancelled; that is not an error.

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input};

pub trait Prompter {
    /// Pick one of `options`; returns its index.
    fn choose_one(&self, prompt: &str, options: &[String]) -> Result<Option<usize>>;

    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Free text; `None` when cancelled or left empty.
    fn input(&self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal prompts rendered with dialoguer.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for TerminalPrompter {
    fn choose_one(&self, prompt: &str, options: &[String]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .highlight_matches(true)
            .interact_opt()
            .context("Failed to display selection prompt")
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact_opt()
            .context("Failed to display confirmation prompt")?;
        Ok(answer.unwrap_or(false))
    }

    fn input(&self, prompt: &str) -> Result<Option<String>> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;
        let value = value.trim().to_string();
        Ok((!value.is_empty()).then_some(value))
    }
}
