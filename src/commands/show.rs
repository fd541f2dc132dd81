// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Show command - inspect a single distro

use super::{load_state, Output};
use crate::assets::{distro_icon_path, sanitize_url};
use crate::config::Config;
use crate::store::Readable;
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct DistroDetails<'a> {
    #[serde(flatten)]
    distro: &'a crate::types::Distro,
    icon: &'static str,
    safe_website: String,
}

/// Run the show command
pub async fn run(config: &Config, id: &str, output: Output) -> Result<()> {
    let state = load_state(config).await?;

    if !state.distro_actions().select_by_id(id) {
        anyhow::bail!("Distro not found: {}", id);
    }
    let selected = state.selected_distro().get();
    let Some(distro) = &*selected else {
        anyhow::bail!("Distro not found: {}", id);
    };

    let details = DistroDetails {
        distro,
        icon: distro_icon_path(&distro.id),
        safe_website: sanitize_url(&distro.website),
    };

    if output.json {
        let json = serde_json::to_string_pretty(&details).context("Failed to serialize distro")?;
        println!("{json}");
        return Ok(());
    }

    println!("{} ({})", distro.name, distro.id);
    println!("  website:  {}", details.safe_website);
    println!("  icon:     {}", details.icon);
    println!("  priority: {}", distro.priority);
    let labels: Vec<String> = distro
        .tag_ids
        .iter()
        .map(|tag_id| {
            state
                .tag_by_id(tag_id)
                .map_or_else(|| tag_id.clone(), |tag| output.tag_label(&tag))
        })
        .collect();
    println!("  tags:     {}", labels.join(", "));
    println!();
    println!("  {}", distro.description);
    Ok(())
}
