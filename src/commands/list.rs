// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! List command - show distros matching every requested tag

use super::{load_state, Output};
use crate::config::Config;
use crate::store::{AppState, Readable};
use crate::types::Distro;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Run the list command
pub async fn run(config: &Config, tags: Vec<String>, output: Output) -> Result<()> {
    let state = load_state(config).await?;

    for tag in &tags {
        if state.tag_by_id(tag).is_none() {
            warn!("Unknown tag: {}", tag);
        }
    }
    state.tag_actions().set(tags);

    let matching = state.filtered_distros().get();
    info!(
        "{} of {} distros match",
        matching.len(),
        state.distros().get().len()
    );

    if output.json {
        let json =
            serde_json::to_string_pretty(&*matching).context("Failed to serialize distros")?;
        println!("{json}");
        return Ok(());
    }

    if matching.is_empty() {
        println!("No distros match the selected tags.");
        return Ok(());
    }

    for distro in matching.iter() {
        println!("{}", render_row(&state, distro, output));
    }
    Ok(())
}

fn render_row(state: &AppState, distro: &Distro, output: Output) -> String {
    let labels: Vec<String> = distro
        .tag_ids
        .iter()
        .map(|id| match state.tag_by_id(id) {
            Some(tag) => output.tag_label(&tag),
            None => id.clone(),
        })
        .collect();
    format!(
        "{:>4}  {:<20} {:<22} {}",
        distro.priority,
        distro.id,
        distro.name,
        labels.join(", ")
    )
}
