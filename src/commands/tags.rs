// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Tags command - list the tag catalog

use super::{load_state, Output};
use crate::config::Config;
use crate::store::Readable;
use anyhow::{Context, Result};

/// Run the tags command
pub async fn run(config: &Config, output: Output) -> Result<()> {
    let state = load_state(config).await?;
    let tags = state.tags().get();

    if output.json {
        let json = serde_json::to_string_pretty(&*tags).context("Failed to serialize tags")?;
        println!("{json}");
        return Ok(());
    }

    for tag in tags.iter() {
        println!("{:<14} {}", tag.id, output.tag_label(tag));
        println!("{:<14} {}", "", tag.description);
    }
    Ok(())
}
