// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Tag filtering of the distro catalog

use crate::store::{Derived, Readable};
use crate::types::Distro;
use std::collections::BTreeSet;

/// Distros carrying every selected tag, stably sorted by ascending priority.
///
/// An empty selection matches the whole catalog.
#[must_use]
pub fn filter_distros(distros: &[Distro], selected: &BTreeSet<String>) -> Vec<Distro> {
    let mut matching: Vec<Distro> = distros
        .iter()
        .filter(|d| selected.iter().all(|tag| d.has_tag(tag)))
        .cloned()
        .collect();

    // sort_by is stable: equal priorities keep catalog order. Adding 0.0
    // folds -0.0 into 0.0 so total_cmp ties them.
    matching.sort_by(|a, b| (a.priority + 0.0).total_cmp(&(b.priority + 0.0)));
    matching
}

/// Build the derived view of `distros` under the `selected` tag filter
pub fn filtered_view(
    distros: &impl Readable<Vec<Distro>>,
    selected: &impl Readable<BTreeSet<String>>,
) -> Derived<Vec<Distro>> {
    Derived::from2(distros, selected, |distros: &Vec<Distro>, selected: &BTreeSet<String>| {
        filter_distros(distros, selected)
    })
}
