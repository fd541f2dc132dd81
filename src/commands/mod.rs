// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod list;
pub mod show;
pub mod tags;
pub mod validate;

use crate::config::Config;
use crate::store::{AppState, Readable};
use crate::types::Tag;
use anyhow::Result;
use owo_colors::OwoColorize;

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Output {
    /// Emit JSON instead of text
    pub json: bool,
    /// Colorize tag names with their catalog color
    pub color: bool,
}

impl Output {
    /// Render a tag label, in its own color when enabled
    #[must_use]
    pub fn tag_label(&self, tag: &Tag) -> String {
        match tag.rgb() {
            Some([r, g, b]) if self.color => tag.name.truecolor(r, g, b).to_string(),
            _ => tag.name.clone(),
        }
    }
}

/// Build application state and run the load sequence against the configured catalog
pub async fn load_state(config: &Config) -> Result<AppState> {
    let state = AppState::new();
    let source = config.catalog_source();
    state.initialize(&*source).await;

    if let Some(message) = state.error().get().as_deref() {
        anyhow::bail!("{message}");
    }
    Ok(state)
}
