// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON output helpers shared by the commands.

use anyhow::Result;
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    println!("{}", to_json(value, compact)?);
    Ok(())
}
