// SPDX-License-Identifier: MIT OR Apache-2.0

//! External processes: `git clone` and detached launcher commands.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::errors::HoundError;

pub trait ProcessRunner {
    /// Clone `address` into `root/dir_name`, waiting for git to finish.
    fn clone_repo(&self, root: &Path, address: &str, dir_name: &str) -> Result<()>;

    /// Start `command` through the shell and return without waiting.
    ///
    /// Only spawning is reported; the launched program's own exit status
    /// is never observed.
    fn detach(&self, command: &str, cwd: &Path) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn clone_repo(&self, root: &Path, address: &str, dir_name: &str) -> Result<()> {
        let clone_failure = |reason: String| HoundError::CloneFailure {
            address: address.to_string(),
            reason,
        };
        let git = which::which("git").map_err(|e| clone_failure(format!("git not found: {e}")))?;

        tracing::info!("Cloning {} into {}", address, root.join(dir_name).display());
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Cloning {address}"));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let output = Command::new(git)
            .args(["clone", "--", address, dir_name])
            .current_dir(root)
            .stdin(Stdio::null())
            .output();
        spinner.finish_and_clear();

        let output = output.map_err(|e| clone_failure(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("git exited with {}", output.status)
            } else {
                stderr
            };
            return Err(clone_failure(reason).into());
        }
        tracing::info!("Clone complete: {}", root.join(dir_name).display());
        Ok(())
    }

    fn detach(&self, command: &str, cwd: &Path) -> Result<()> {
        tracing::info!(command, "launching");
        shell_command(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start launcher: {command}"))?;
        Ok(())
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(not(unix))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
